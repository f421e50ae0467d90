use super::domain::HistoryEntry;
use crate::repository::RepositoryError;

pub trait HistoryRepository: Send + Sync {
    fn insert(&self, entry: HistoryEntry) -> Result<HistoryEntry, RepositoryError>;
    /// Entries for one user, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<HistoryEntry>, RepositoryError>;
    fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
