//! Route aggregate domain model.
//!
//! # Responsibility
//! - Define the route head/item records and the write/read models around
//!   them (save draft, head update, denormalized views).
//!
//! # Invariants
//! - A route head belongs to exactly one user for its whole lifetime.
//! - Item order is insertion order and is preserved on every read.
//! - Write models are validated before any persistence attempt.

use crate::model::place::Place;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a saved route, assigned at save time.
pub type RouteId = Uuid;

/// Identifier for one ordered stop row inside a route.
pub type RouteItemId = i64;

/// Persisted route head record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHead {
    pub uuid: RouteId,
    pub user_id: UserId,
    pub course_name: String,
    pub town: Option<String>,
    /// Caller-supplied total distance; opaque to this core.
    pub tot_distance: f64,
    pub content: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds; bumped on every head update.
    pub updated_at: i64,
}

/// Input model for saving a new route.
///
/// `stops` is the ordered list of place catalog ids; every id must resolve
/// in the catalog or the whole save aborts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDraft {
    pub course_name: String,
    pub town: Option<String>,
    pub tot_distance: f64,
    pub stops: Vec<String>,
}

impl RouteDraft {
    /// Checks input shape before any persistence attempt.
    pub fn validate(&self) -> Result<(), RouteValidationError> {
        if self.course_name.trim().is_empty() {
            return Err(RouteValidationError::BlankCourseName);
        }
        for (position, stop) in self.stops.iter().enumerate() {
            if stop.trim().is_empty() {
                return Err(RouteValidationError::BlankStopReference { position });
            }
        }
        Ok(())
    }
}

/// Input model for updating a route head.
///
/// The tag list is authoritative: `None` means "no tags requested" and
/// clears all associations, exactly like an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHeadUpdate {
    pub id: RouteId,
    pub course_name: String,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl RouteHeadUpdate {
    /// Checks input shape before any persistence attempt.
    pub fn validate(&self) -> Result<(), RouteValidationError> {
        if self.course_name.trim().is_empty() {
            return Err(RouteValidationError::BlankCourseName);
        }
        Ok(())
    }
}

/// Fully denormalized read model for one route.
///
/// `content` is populated by the single-route read path and omitted by the
/// per-user list path to keep list payloads small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub id: RouteId,
    pub course_name: String,
    pub town: Option<String>,
    pub tot_distance: f64,
    pub content: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Items in insertion (`seq`) order, each with a full place snapshot.
    pub items: Vec<RouteItemView>,
    /// Associated tag names, sorted.
    pub tags: Vec<String>,
}

/// One ordered stop expanded with its current place snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteItemView {
    pub id: RouteItemId,
    pub place: Place,
}

/// Shape errors in route write models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteValidationError {
    BlankCourseName,
    BlankStopReference { position: usize },
}

impl Display for RouteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCourseName => write!(f, "course name must not be blank"),
            Self::BlankStopReference { position } => {
                write!(f, "stop reference at position {position} must not be blank")
            }
        }
    }
}

impl Error for RouteValidationError {}

#[cfg(test)]
mod tests {
    use super::{RouteDraft, RouteHeadUpdate, RouteValidationError};
    use uuid::Uuid;

    fn draft() -> RouteDraft {
        RouteDraft {
            course_name: "Seaside Loop".to_string(),
            town: Some("Busan".to_string()),
            tot_distance: 12.4,
            stops: vec!["101".to_string(), "202".to_string()],
        }
    }

    #[test]
    fn valid_draft_passes_validation() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_course_name_is_rejected() {
        let mut input = draft();
        input.course_name = "   ".to_string();
        assert_eq!(
            input.validate(),
            Err(RouteValidationError::BlankCourseName)
        );
    }

    #[test]
    fn blank_stop_reference_reports_position() {
        let mut input = draft();
        input.stops.push(" ".to_string());
        assert_eq!(
            input.validate(),
            Err(RouteValidationError::BlankStopReference { position: 2 })
        );
    }

    #[test]
    fn blank_course_name_in_update_is_rejected() {
        let update = RouteHeadUpdate {
            id: Uuid::new_v4(),
            course_name: String::new(),
            content: None,
            tags: None,
        };
        assert_eq!(
            update.validate(),
            Err(RouteValidationError::BlankCourseName)
        );
    }
}
