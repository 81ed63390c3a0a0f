//! Place catalog accessor.
//!
//! # Responsibility
//! - Resolve catalog entries by their stable `content_id`.
//! - Own the place row projection shared with the route read path.
//!
//! # Invariants
//! - The catalog is read-only from this crate; ingestion/refresh is an
//!   external concern.

use crate::model::place::Place;
use crate::repo::route_repo::{RepoResult, SqliteRouteStore};
use rusqlite::Row;

pub(crate) const PLACE_COLUMNS: &str = "content_id,
    title,
    addr1,
    addr2,
    area_code,
    book_tour,
    cat1,
    cat2,
    cat3,
    content_type_id,
    created_time,
    modified_time,
    first_image,
    first_image2,
    map_x,
    map_y,
    tel,
    overview,
    last_updated";

/// Read-only lookup contract against the external place catalog.
pub trait PlaceCatalog {
    /// Resolves one place by its external catalog identifier.
    fn find_by_catalog_id(&self, content_id: &str) -> RepoResult<Option<Place>>;
}

impl PlaceCatalog for SqliteRouteStore<'_> {
    fn find_by_catalog_id(&self, content_id: &str) -> RepoResult<Option<Place>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {PLACE_COLUMNS}
             FROM places
             WHERE content_id = ?1;"
        ))?;

        let mut rows = stmt.query([content_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_place_row(row)?));
        }

        Ok(None)
    }
}

/// Parses one place projection row (shared with the route item join).
pub(crate) fn parse_place_row(row: &Row<'_>) -> RepoResult<Place> {
    Ok(Place {
        content_id: row.get("content_id")?,
        title: row.get("title")?,
        addr1: row.get("addr1")?,
        addr2: row.get("addr2")?,
        area_code: row.get("area_code")?,
        book_tour: row.get("book_tour")?,
        cat1: row.get("cat1")?,
        cat2: row.get("cat2")?,
        cat3: row.get("cat3")?,
        content_type_id: row.get("content_type_id")?,
        created_time: row.get("created_time")?,
        modified_time: row.get("modified_time")?,
        first_image: row.get("first_image")?,
        first_image2: row.get("first_image2")?,
        map_x: row.get("map_x")?,
        map_y: row.get("map_y")?,
        tel: row.get("tel")?,
        overview: row.get("overview")?,
        last_updated: row.get("last_updated")?,
    })
}
