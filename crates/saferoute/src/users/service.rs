use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{LoginRequest, UserProfile};
use super::repository::UserRepository;
use crate::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn login(&self, request: LoginRequest) -> Result<UserProfile, UserServiceError> {
        self.login_at(request, Utc::now())
    }

    /// Upserts by UID. Fields absent from the request keep their stored values.
    pub fn login_at(
        &self,
        request: LoginRequest,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, UserServiceError> {
        let uid = request
            .uid
            .as_deref()
            .map(str::trim)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| UserServiceError::Validation("uid is required".to_string()))?
            .to_string();

        let profile = match self.repository.fetch(&uid)? {
            Some(existing) => UserProfile {
                email: request.email.or(existing.email),
                display_name: request.display_name.or(existing.display_name),
                photo_url: request.photo_url.or(existing.photo_url),
                last_login_at: now,
                ..existing
            },
            None => UserProfile {
                uid,
                email: request.email,
                display_name: request.display_name,
                photo_url: request.photo_url,
                created_at: now,
                last_login_at: now,
            },
        };

        Ok(self.repository.upsert(profile)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryUsers {
        profiles: Mutex<HashMap<String, UserProfile>>,
    }

    impl UserRepository for MemoryUsers {
        fn fetch(&self, uid: &str) -> Result<Option<UserProfile>, RepositoryError> {
            Ok(self.profiles.lock().expect("user mutex poisoned").get(uid).cloned())
        }

        fn upsert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
            self.profiles
                .lock()
                .expect("user mutex poisoned")
                .insert(profile.uid.clone(), profile.clone());
            Ok(profile)
        }
    }

    #[test]
    fn login_requires_uid() {
        let service = UserService::new(Arc::new(MemoryUsers::default()));
        assert!(matches!(
            service.login(LoginRequest::default()),
            Err(UserServiceError::Validation(_))
        ));
    }

    #[test]
    fn repeat_login_keeps_creation_time_and_known_fields() {
        let service = UserService::new(Arc::new(MemoryUsers::default()));
        let first_seen = Utc::now() - Duration::days(3);

        let created = service
            .login_at(
                LoginRequest {
                    uid: Some("firebase-uid-1".to_string()),
                    email: Some("ada@example.com".to_string()),
                    display_name: Some("Ada".to_string()),
                    photo_url: None,
                },
                first_seen,
            )
            .expect("first login");

        let now = Utc::now();
        let updated = service
            .login_at(
                LoginRequest {
                    uid: Some("firebase-uid-1".to_string()),
                    display_name: Some("Ada O.".to_string()),
                    ..LoginRequest::default()
                },
                now,
            )
            .expect("second login");

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.last_login_at, now);
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
        assert_eq!(updated.display_name.as_deref(), Some("Ada O."));
    }
}
