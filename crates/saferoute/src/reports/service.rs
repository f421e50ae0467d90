use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{HazardReport, ReportSubmission};
use super::repository::ReportRepository;
use crate::geometry::RouteGeometry;
use crate::repository::{next_record_id, RepositoryError};

pub const MAX_LISTED_REPORTS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct ReportService<R> {
    repository: Arc<R>,
}

impl<R> ReportService<R>
where
    R: ReportRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<HazardReport>, ReportServiceError> {
        Ok(self.repository.recent(MAX_LISTED_REPORTS)?)
    }

    pub fn submit(&self, submission: ReportSubmission) -> Result<HazardReport, ReportServiceError> {
        let category = submission
            .category
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty())
            .ok_or_else(|| ReportServiceError::Validation("category is required".to_string()))?;

        let location = submission
            .location
            .ok_or_else(|| ReportServiceError::Validation("location is required".to_string()))?;
        RouteGeometry::new(vec![location])
            .validate()
            .map_err(|_| ReportServiceError::Validation("location is out of range".to_string()))?;

        let report = HazardReport {
            id: next_record_id("rpt"),
            user_id: submission.user_id.filter(|id| !id.trim().is_empty()),
            category,
            description: submission.description.filter(|text| !text.trim().is_empty()),
            location,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(report)?;
        info!(id = %stored.id, category = %stored.category, "hazard report recorded");
        Ok(stored)
    }

    pub fn delete(&self, id: &str) -> Result<(), ReportServiceError> {
        Ok(self.repository.delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryReports {
        reports: Mutex<Vec<HazardReport>>,
    }

    impl ReportRepository for MemoryReports {
        fn insert(&self, report: HazardReport) -> Result<HazardReport, RepositoryError> {
            self.reports.lock().expect("report mutex poisoned").push(report.clone());
            Ok(report)
        }

        fn recent(&self, limit: usize) -> Result<Vec<HazardReport>, RepositoryError> {
            let guard = self.reports.lock().expect("report mutex poisoned");
            Ok(guard.iter().rev().take(limit).cloned().collect())
        }

        fn delete(&self, id: &str) -> Result<(), RepositoryError> {
            let mut guard = self.reports.lock().expect("report mutex poisoned");
            match guard.iter().position(|r| r.id == id) {
                Some(index) => {
                    guard.remove(index);
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }
    }

    fn flooding() -> ReportSubmission {
        ReportSubmission {
            user_id: Some("u-7".to_string()),
            category: Some(" flooding ".to_string()),
            description: Some("Water over the kerb".to_string()),
            location: Some([3.4219, 6.4281]),
        }
    }

    #[test]
    fn submit_validates_category_and_location() {
        let service = ReportService::new(Arc::new(MemoryReports::default()));

        let mut no_category = flooding();
        no_category.category = Some(String::new());
        assert!(matches!(
            service.submit(no_category),
            Err(ReportServiceError::Validation(_))
        ));

        let mut no_location = flooding();
        no_location.location = None;
        assert!(matches!(
            service.submit(no_location),
            Err(ReportServiceError::Validation(_))
        ));

        let mut off_map = flooding();
        off_map.location = Some([190.0, 6.4]);
        assert!(matches!(
            service.submit(off_map),
            Err(ReportServiceError::Validation(_))
        ));
    }

    #[test]
    fn lists_newest_first() {
        let service = ReportService::new(Arc::new(MemoryReports::default()));
        let first = service.submit(flooding()).expect("first report");
        let second = service.submit(flooding()).expect("second report");
        assert_eq!(first.category, "flooding");

        let ids: Vec<_> = service.list().expect("lists").into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
