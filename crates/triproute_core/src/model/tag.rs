//! Tag dictionary entry.

use serde::{Deserialize, Serialize};

/// Dictionary-assigned tag identifier.
pub type TagId = i64;

/// One entry in the global tag dictionary.
///
/// `name` is the natural key: uniqueness is enforced on the name
/// (case-sensitive), not on the id. Tags are shared across all routes and
/// are never owned by a single route head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
