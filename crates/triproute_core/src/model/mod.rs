//! Domain model for the route-planning core.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep write models (drafts/updates) separate from denormalized views.
//!
//! # Invariants
//! - Every saved route is identified by a stable `RouteId`.
//! - Places and users are externally owned; their records are read-only here.

pub mod place;
pub mod route;
pub mod tag;
pub mod user;
