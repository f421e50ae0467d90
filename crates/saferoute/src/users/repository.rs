use super::domain::UserProfile;
use crate::repository::RepositoryError;

pub trait UserRepository: Send + Sync {
    fn fetch(&self, uid: &str) -> Result<Option<UserProfile>, RepositoryError>;
    /// Inserts or replaces the profile stored under `profile.uid`.
    fn upsert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError>;
}
