use std::sync::Arc;

use chrono::Utc;

use super::domain::{HistoryEntry, HistorySubmission};
use super::repository::HistoryRepository;
use crate::geometry::TravelMode;
use crate::repository::{next_record_id, RepositoryError};
use crate::scoring::{RiskLevel, ScoreColor};

#[derive(Debug, thiserror::Error)]
pub enum HistoryServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct HistoryService<R> {
    repository: Arc<R>,
}

impl<R> HistoryService<R>
where
    R: HistoryRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self, user_id: Option<&str>) -> Result<Vec<HistoryEntry>, HistoryServiceError> {
        let user_id = required_user(user_id)?;
        Ok(self.repository.list_for_user(user_id)?)
    }

    pub fn save(&self, submission: HistorySubmission) -> Result<HistoryEntry, HistoryServiceError> {
        let user_id = required_user(submission.user_id.as_deref())?.to_string();
        let destination = submission
            .destination
            .ok_or_else(|| HistoryServiceError::Validation("destination is required".to_string()))?;

        let score = submission
            .score
            .filter(|score| score.is_finite())
            .map(|score| score.clamp(1.0, 10.0));

        let entry = HistoryEntry {
            id: next_record_id("hist"),
            user_id,
            start: submission.start,
            destination,
            destination_name: submission.destination_name,
            mode: TravelMode::parse_or_default(submission.mode.as_deref()),
            score,
            color: score.map(ScoreColor::from_score),
            risk_level: score.map(RiskLevel::from_score),
            distance: submission.distance,
            duration: submission.duration,
            created_at: Utc::now(),
        };

        Ok(self.repository.insert(entry)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), HistoryServiceError> {
        Ok(self.repository.delete(id)?)
    }
}

fn required_user(user_id: Option<&str>) -> Result<&str, HistoryServiceError> {
    user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HistoryServiceError::Validation("userId is required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryHistory {
        entries: Mutex<Vec<HistoryEntry>>,
    }

    impl HistoryRepository for MemoryHistory {
        fn insert(&self, entry: HistoryEntry) -> Result<HistoryEntry, RepositoryError> {
            self.entries.lock().expect("history mutex poisoned").push(entry.clone());
            Ok(entry)
        }

        fn list_for_user(&self, user_id: &str) -> Result<Vec<HistoryEntry>, RepositoryError> {
            let guard = self.entries.lock().expect("history mutex poisoned");
            let mut entries: Vec<_> =
                guard.iter().filter(|e| e.user_id == user_id).cloned().collect();
            entries.reverse();
            Ok(entries)
        }

        fn delete(&self, id: &str) -> Result<(), RepositoryError> {
            let mut guard = self.entries.lock().expect("history mutex poisoned");
            let before = guard.len();
            guard.retain(|e| e.id != id);
            if guard.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            }
        }
    }

    fn submission(user: &str) -> HistorySubmission {
        HistorySubmission {
            user_id: Some(user.to_string()),
            destination: Some([3.4697, 6.4478]),
            destination_name: Some("Lekki Phase 1 Gate".to_string()),
            mode: Some("walking".to_string()),
            score: Some(8.3),
            ..HistorySubmission::default()
        }
    }

    #[test]
    fn save_requires_user_and_destination() {
        let service = HistoryService::new(Arc::new(MemoryHistory::default()));

        let mut missing_user = submission("u-1");
        missing_user.user_id = Some("  ".to_string());
        assert!(matches!(
            service.save(missing_user),
            Err(HistoryServiceError::Validation(_))
        ));

        let mut missing_destination = submission("u-1");
        missing_destination.destination = None;
        assert!(matches!(
            service.save(missing_destination),
            Err(HistoryServiceError::Validation(_))
        ));
    }

    #[test]
    fn save_derives_bands_and_lists_per_user() {
        let service = HistoryService::new(Arc::new(MemoryHistory::default()));
        let saved = service.save(submission("u-1")).expect("saves");
        service.save(submission("u-2")).expect("saves");

        assert_eq!(saved.color, Some(ScoreColor::Green));
        assert_eq!(saved.risk_level, Some(RiskLevel::Low));
        assert_eq!(saved.mode, TravelMode::Walking);

        let listed = service.list(Some("u-1")).expect("lists");
        assert_eq!(listed, vec![saved]);
        assert!(matches!(
            service.list(None),
            Err(HistoryServiceError::Validation(_))
        ));
    }

    #[test]
    fn delete_reports_missing_entries() {
        let service = HistoryService::new(Arc::new(MemoryHistory::default()));
        let saved = service.save(submission("u-1")).expect("saves");
        service.delete(&saved.id).expect("deletes");
        assert!(matches!(
            service.delete(&saved.id),
            Err(HistoryServiceError::Repository(RepositoryError::NotFound))
        ));
    }
}
