//! Geo-tagged hazard reports submitted by travellers.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{HazardReport, ReportSubmission};
pub use repository::ReportRepository;
pub use router::reports_router;
pub use service::{ReportService, ReportServiceError, MAX_LISTED_REPORTS};
