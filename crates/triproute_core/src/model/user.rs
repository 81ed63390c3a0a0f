//! User directory read model.
//!
//! Account lifecycle (registration, credentials, sessions) is owned by the
//! external identity layer; the core only resolves owners by e-mail.

use serde::{Deserialize, Serialize};

/// Directory-assigned user identifier.
pub type UserId = i64;

/// Read-only view of one directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Natural lookup key used by the engine (`find_by_email`).
    pub email: String,
    pub display_name: Option<String>,
}
