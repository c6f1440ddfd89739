//! In-memory ports and helpers for router tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use talentscan_api::{AppState, create_router};
use talentscan_core::history::{
    HistoryCounters, HistoryEntry, HistoryError, HistoryRepository, HistoryService,
};
use talentscan_core::profile::{
    AssetField, AssetSwap, ProfileChanges, ProfileError, ProfileRepository, ProfileService,
    StudentProfile,
};
use talentscan_core::storage::{ObjectIdentity, ObjectStore, PresignedUrl, StorageError};
use talentscan_core::upload::{SlotRepository, UploadError, UploadPolicy, UploadService, UploadSlot};
use talentscan_shared::types::UploadId;
use talentscan_shared::{JwtConfig, JwtService, Role};
use uuid::Uuid;

pub const COOKIE: &str = "talentscan_session";
pub const BUCKET: &str = "fair-uploads";

/// Object store that records every call.
#[derive(Default)]
pub struct MockStore {
    pub objects: Mutex<HashSet<String>>,
    pub public: Mutex<HashSet<String>>,
    pub calls: AtomicUsize,
}

impl MockStore {
    pub fn put(&self, key: &str) {
        self.objects.lock().unwrap().insert(key.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let expires_at = Utc::now() + chrono::Duration::from_std(ttl).unwrap();
        Ok(PresignedUrl {
            url: format!("https://upload.test/{BUCKET}/{key}?sig=abc"),
            method: "PUT".to_string(),
            expires_at,
            headers: HashMap::from([("Content-Type".to_string(), content_type.to_string())]),
        })
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.lock().unwrap().contains(key))
    }

    async fn make_public(&self, key: &str) -> Result<ObjectIdentity, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.public.lock().unwrap().insert(key.to_string());
        Ok(ObjectIdentity {
            bucket: BUCKET.to_string(),
            object: key.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    fn bucket(&self) -> &str {
        BUCKET
    }

    fn public_base_url(&self) -> &str {
        "https://storage.googleapis.com"
    }
}

#[derive(Default)]
pub struct MockSlots {
    pub slots: Mutex<HashMap<UploadId, UploadSlot>>,
}

#[async_trait]
impl SlotRepository for MockSlots {
    async fn insert(&self, slot: &UploadSlot) -> Result<(), UploadError> {
        self.slots.lock().unwrap().insert(slot.id, slot.clone());
        Ok(())
    }

    async fn find(&self, id: UploadId) -> Result<Option<UploadSlot>, UploadError> {
        Ok(self.slots.lock().unwrap().get(&id).cloned())
    }

    async fn mark_bound(
        &self,
        id: UploadId,
        url: &str,
        bound_at: DateTime<Utc>,
    ) -> Result<bool, UploadError> {
        let mut slots = self.slots.lock().unwrap();
        match slots.get_mut(&id) {
            Some(slot)
                if slot.state == talentscan_core::upload::SlotState::Pending
                    && !slot.is_expired(bound_at) =>
            {
                slot.state = talentscan_core::upload::SlotState::Bound {
                    url: url.to_string(),
                    bound_at,
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release(&self, id: UploadId) -> Result<bool, UploadError> {
        let mut slots = self.slots.lock().unwrap();
        match slots.get_mut(&id) {
            Some(slot) if slot.state != talentscan_core::upload::SlotState::Pending => {
                slot.state = talentscan_core::upload::SlotState::Pending;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_expired_pending(
        &self,
        _now: DateTime<Utc>,
        _limit: u64,
    ) -> Result<Vec<UploadSlot>, UploadError> {
        Ok(Vec::new())
    }

    async fn remove(&self, id: UploadId) -> Result<(), UploadError> {
        self.slots.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockProfiles {
    pub profiles: Mutex<HashMap<String, StudentProfile>>,
    pub writes: AtomicUsize,
}

impl MockProfiles {
    pub fn with_student(code: &str) -> Self {
        let repo = Self::default();
        repo.profiles.lock().unwrap().insert(
            code.to_string(),
            StudentProfile {
                code: code.to_string(),
                name: "Ana Silva".to_string(),
                year: 3,
                image: None,
                cv: None,
                bio: None,
                linkedin: None,
                github: None,
                interests: Vec::new(),
                updated_at: Utc::now(),
            },
        );
        repo
    }

    pub fn get(&self, code: &str) -> Option<StudentProfile> {
        self.profiles.lock().unwrap().get(code).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for MockProfiles {
    async fn find_by_code(&self, code: &str) -> Result<Option<StudentProfile>, ProfileError> {
        Ok(self.get(code))
    }

    async fn exists(&self, code: &str) -> Result<bool, ProfileError> {
        Ok(self.profiles.lock().unwrap().contains_key(code))
    }

    async fn apply_changes(
        &self,
        code: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<StudentProfile>, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.get_mut(code) else {
            return Ok(None);
        };
        self.writes.fetch_add(1, Ordering::SeqCst);
        profile.bio = changes.bio.apply(profile.bio.take());
        profile.linkedin = changes.linkedin.apply(profile.linkedin.take());
        profile.github = changes.github.apply(profile.github.take());
        if let Some(interests) = &changes.interests {
            profile.interests.clone_from(interests);
        }
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }

    async fn set_asset(
        &self,
        code: &str,
        field: AssetField,
        url: &str,
    ) -> Result<Option<AssetSwap>, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.get_mut(code) else {
            return Ok(None);
        };
        self.writes.fetch_add(1, Ordering::SeqCst);
        let slot = match field {
            AssetField::Image => &mut profile.image,
            AssetField::Cv => &mut profile.cv,
        };
        let previous = slot.replace(url.to_string());
        Ok(Some(AssetSwap { previous }))
    }
}

#[derive(Default)]
pub struct MockHistory {
    pub counters: Mutex<HashMap<String, HistoryCounters>>,
    pub saves: Mutex<Vec<(String, HistoryEntry)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl HistoryRepository for MockHistory {
    async fn counters(&self, code: &str) -> Result<Option<HistoryCounters>, HistoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.counters.lock().unwrap().get(code).copied())
    }

    async fn recent_saves(
        &self,
        code: &str,
        limit: u64,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .saves
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == code)
            .map(|(_, entry)| entry.clone())
            .take(usize::try_from(limit).unwrap())
            .collect())
    }
}

/// Router wired to in-memory ports.
pub struct TestApp {
    pub router: Router,
    pub jwt: Arc<JwtService>,
    pub store: Arc<MockStore>,
    pub slots: Arc<MockSlots>,
    pub profiles: Arc<MockProfiles>,
    pub history: Arc<MockHistory>,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt = Arc::new(JwtService::new(JwtConfig::default()));
        let store = Arc::new(MockStore::default());
        let slots = Arc::new(MockSlots::default());
        let profiles = Arc::new(MockProfiles::with_student("S123"));
        let history = Arc::new(MockHistory::default());

        let state = AppState {
            jwt_service: jwt.clone(),
            cookie_name: Arc::from(COOKIE),
            uploads: Arc::new(UploadService::new(
                store.clone(),
                slots.clone(),
                profiles.clone(),
                UploadPolicy::default(),
            )),
            profiles: Arc::new(ProfileService::new(profiles.clone())),
            history: Arc::new(HistoryService::new(history.clone(), 5)),
        };

        Self {
            router: create_router(state),
            jwt,
            store,
            slots,
            profiles,
            history,
        }
    }

    pub fn session(&self, role: Role, code: Option<&str>) -> String {
        self.jwt
            .generate_session_token(Uuid::now_v7(), role, code)
            .unwrap()
    }

    pub fn student_cookie(&self, code: &str) -> String {
        format!("{COOKIE}={}", self.session(Role::Student, Some(code)))
    }
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
