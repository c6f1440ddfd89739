use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_new_upload_ids_are_v7_and_distinct() {
    let a = UploadId::new();
    let b = UploadId::new();
    assert_ne!(a, b);
    assert_eq!(a.into_inner().get_version_num(), 7);
}

#[test]
fn test_company_id_round_trips_through_uuid() {
    let uuid = Uuid::new_v4();
    assert_eq!(CompanyId::from_uuid(uuid).into_inner(), uuid);
}

#[test]
fn test_upload_id_display_matches_object_key_suffix() {
    let uuid = Uuid::parse_str("6ba7b811-9dad-11d1-80b4-00c04fd430c8").unwrap();
    let id = UploadId::from_uuid(uuid);
    assert_eq!(format!("avatar/{id}"), "avatar/6ba7b811-9dad-11d1-80b4-00c04fd430c8");
}

#[test]
fn test_upload_id_from_str() {
    let uuid = Uuid::now_v7();
    let id = UploadId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
    assert!(UploadId::from_str("S123").is_err());
}

#[test]
fn test_upload_id_serializes_as_plain_uuid() {
    let uuid = Uuid::new_v4();
    let id = UploadId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}

#[test]
fn test_upload_id_rejects_malformed_json() {
    let parsed: Result<UploadId, _> = serde_json::from_str("\"not-a-uuid\"");
    assert!(parsed.is_err());
}
