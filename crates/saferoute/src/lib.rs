pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod places;
pub mod reports;
pub mod repository;
pub mod routing;
pub mod scoring;
pub mod telemetry;
pub mod users;
