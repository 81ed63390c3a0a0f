//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`RouteNotFound`) in addition
//!   to DB transport errors.
//! - Multi-row writes (head+items, tag reconciliation) commit atomically.

pub mod place_repo;
pub mod route_repo;
pub mod tag_repo;
pub mod user_repo;
