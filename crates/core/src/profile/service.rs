//! Profile service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::error::ProfileError;
use super::types::{AssetField, AssetSwap, ProfileChanges, ProfileUpdate, StudentProfile};
use super::validation::validate_update;

/// Repository trait for student profile persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by student code.
    async fn find_by_code(&self, code: &str) -> Result<Option<StudentProfile>, ProfileError>;

    /// Whether a student with this code exists.
    async fn exists(&self, code: &str) -> Result<bool, ProfileError>;

    /// Apply validated changes. `None` when the student does not exist.
    async fn apply_changes(
        &self,
        code: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<StudentProfile>, ProfileError>;

    /// Overwrite an asset URL, returning what it replaced.
    /// `None` when the student does not exist.
    async fn set_asset(
        &self,
        code: &str,
        field: AssetField,
        url: &str,
    ) -> Result<Option<AssetSwap>, ProfileError>;
}

/// Reads and edits student profiles.
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Fetch a profile.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown codes.
    pub async fn get(&self, code: &str) -> Result<StudentProfile, ProfileError> {
        self.repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| ProfileError::not_found(code))
    }

    /// Validate and apply a partial update.
    ///
    /// Nothing is written when any rule fails.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with every violation, or `NotFound` for unknown codes.
    pub async fn update(
        &self,
        code: &str,
        update: ProfileUpdate,
    ) -> Result<StudentProfile, ProfileError> {
        validate_update(&update).map_err(ProfileError::Validation)?;

        if update.is_empty() {
            return self.get(code).await;
        }

        let profile = self
            .repo
            .apply_changes(code, &update.into_changes())
            .await?
            .ok_or_else(|| ProfileError::not_found(code))?;

        info!(code = %code, "Profile updated");
        Ok(profile)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;

    /// In-memory profile store with write counters.
    #[derive(Default)]
    pub(crate) struct MockProfileRepository {
        pub(crate) profiles: Mutex<HashMap<String, StudentProfile>>,
        pub(crate) writes: AtomicUsize,
        pub(crate) fail_set_asset: Mutex<bool>,
    }

    impl MockProfileRepository {
        pub(crate) fn with_student(code: &str) -> Self {
            let repo = Self::default();
            repo.insert(StudentProfile {
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
            });
            repo
        }

        pub(crate) fn insert(&self, profile: StudentProfile) {
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.code.clone(), profile);
        }

        pub(crate) fn get(&self, code: &str) -> Option<StudentProfile> {
            self.profiles.lock().unwrap().get(code).cloned()
        }

        pub(crate) fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
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
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut profiles = self.profiles.lock().unwrap();
            let Some(profile) = profiles.get_mut(code) else {
                return Ok(None);
            };
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
            if *self.fail_set_asset.lock().unwrap() {
                return Err(ProfileError::repository("connection reset"));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut profiles = self.profiles.lock().unwrap();
            let Some(profile) = profiles.get_mut(code) else {
                return Ok(None);
            };
            let slot = match field {
                AssetField::Image => &mut profile.image,
                AssetField::Cv => &mut profile.cv,
            };
            let previous = slot.replace(url.to_string());
            Ok(Some(AssetSwap { previous }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProfileRepository;
    use super::*;

    fn service(repo: &Arc<MockProfileRepository>) -> ProfileService {
        ProfileService::new(repo.clone())
    }

    #[tokio::test]
    async fn test_get_unknown_code() {
        let repo = Arc::new(MockProfileRepository::default());
        let err = service(&repo).get("S404").await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(code) if code == "S404"));
    }

    #[tokio::test]
    async fn test_update_applies_changes() {
        let repo = Arc::new(MockProfileRepository::with_student("S123"));
        let update = ProfileUpdate {
            bio: Some("Backend enthusiast".into()),
            github: Some("https://github.com/ana".into()),
            interests: Some(vec![" rust ".into(), "databases".into()]),
            ..ProfileUpdate::default()
        };

        let profile = service(&repo).update("S123", update).await.unwrap();
        assert_eq!(profile.bio.as_deref(), Some("Backend enthusiast"));
        assert_eq!(profile.github.as_deref(), Some("https://github.com/ana"));
        assert_eq!(profile.interests, vec!["rust", "databases"]);
    }

    #[tokio::test]
    async fn test_update_clears_link() {
        let repo = Arc::new(MockProfileRepository::with_student("S123"));
        let svc = service(&repo);
        svc.update(
            "S123",
            ProfileUpdate {
                linkedin: Some("https://www.linkedin.com/in/ana".into()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

        let profile = svc
            .update(
                "S123",
                ProfileUpdate {
                    linkedin: Some(String::new()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.linkedin, None);
    }

    #[tokio::test]
    async fn test_invalid_update_writes_nothing() {
        let repo = Arc::new(MockProfileRepository::with_student("S123"));
        let update = ProfileUpdate {
            linkedin: Some("https://facebook.com/ana".into()),
            ..ProfileUpdate::default()
        };

        let err = service(&repo).update("S123", update).await.unwrap_err();
        assert!(matches!(err, ProfileError::Validation(ref v) if v.len() == 1));
        assert_eq!(err.details().len(), 1);
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_profile() {
        let repo = Arc::new(MockProfileRepository::with_student("S123"));
        let profile = service(&repo)
            .update("S123", ProfileUpdate::default())
            .await
            .unwrap();
        assert_eq!(profile.code, "S123");
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_code() {
        let repo = Arc::new(MockProfileRepository::default());
        let update = ProfileUpdate {
            bio: Some("hi".into()),
            ..ProfileUpdate::default()
        };
        let err = service(&repo).update("S404", update).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(_)));
    }
}
