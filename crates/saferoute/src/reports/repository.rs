use super::domain::HazardReport;
use crate::repository::RepositoryError;

pub trait ReportRepository: Send + Sync {
    fn insert(&self, report: HazardReport) -> Result<HazardReport, RepositoryError>;
    /// Most recent reports first, at most `limit`.
    fn recent(&self, limit: usize) -> Result<Vec<HazardReport>, RepositoryError>;
    fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
