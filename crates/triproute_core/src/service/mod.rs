//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep transport/auth layers decoupled from storage details.

pub mod route_service;
