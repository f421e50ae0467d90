//! User profiles keyed by the external identity provider's UID.
//!
//! Authentication itself happens upstream; `/auth/login` only records the profile.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{LoginRequest, UserProfile};
pub use repository::UserRepository;
pub use router::users_router;
pub use service::{UserService, UserServiceError};
