//! Core domain logic for the trip-route planning backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::place::Place;
pub use model::route::{
    RouteDraft, RouteHead, RouteHeadUpdate, RouteId, RouteItemView, RouteValidationError,
    RouteView,
};
pub use model::tag::{Tag, TagId};
pub use model::user::{User, UserId};
pub use repo::place_repo::PlaceCatalog;
pub use repo::route_repo::{RepoError, RepoResult, RouteRepository, SqliteRouteStore};
pub use repo::tag_repo::{normalize_tag_names, TagDictionary};
pub use repo::user_repo::UserDirectory;
pub use service::route_service::{RouteService, RouteServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
