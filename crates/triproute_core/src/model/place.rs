//! Place catalog read model.
//!
//! # Responsibility
//! - Mirror the attribute set of the external place catalog record.
//!
//! # Invariants
//! - `content_id` is the stable catalog key and never changes.
//! - Core code never mutates place rows; ingestion lives outside this crate.

use serde::{Deserialize, Serialize};

/// One externally catalogued point of interest.
///
/// Field names follow the source catalog schema: two-part address, three
/// category code levels, two image URLs, map coordinates and catalog
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable external catalog identifier.
    pub content_id: String,
    pub title: String,
    pub addr1: Option<String>,
    pub addr2: Option<String>,
    pub area_code: Option<String>,
    pub book_tour: Option<String>,
    pub cat1: Option<String>,
    pub cat2: Option<String>,
    pub cat3: Option<String>,
    pub content_type_id: Option<String>,
    pub created_time: Option<String>,
    pub modified_time: Option<String>,
    pub first_image: Option<String>,
    pub first_image2: Option<String>,
    pub map_x: Option<f64>,
    pub map_y: Option<f64>,
    pub tel: Option<String>,
    pub overview: Option<String>,
    /// Epoch milliseconds of the last catalog sync for this row.
    pub last_updated: Option<i64>,
}
