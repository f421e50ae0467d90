//! Saved trips per user.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{HistoryEntry, HistorySubmission};
pub use repository::HistoryRepository;
pub use router::history_router;
pub use service::{HistoryService, HistoryServiceError};
