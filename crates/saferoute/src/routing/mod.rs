//! Candidate route generation and the scoring HTTP surface.

pub mod options;
pub mod planner;
pub mod router;

pub use options::{
    RouteOption, RouteOptionsRequest, RouteOptionsService, RouteRequestError, RouteScoreRequest,
};
pub use planner::{CandidateRoute, RoutePlanner};
pub use router::route_router;
