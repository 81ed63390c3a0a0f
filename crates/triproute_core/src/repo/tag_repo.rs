//! Global tag dictionary.
//!
//! # Responsibility
//! - Maintain the name-deduplicated set of tags shared by all routes.
//! - Support the set-difference queries used by tag reconciliation.
//!
//! # Invariants
//! - Tag name matching is case-sensitive exact match.
//! - After any `create_missing` call, no two tag rows share a name
//!   (storage UNIQUE constraint is the final backstop).
//! - No caller mutates tag rows outside this module.

use crate::model::tag::Tag;
use crate::repo::route_repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeSet;

/// Dictionary handle borrowing a connection.
///
/// A `rusqlite::Transaction` derefs to `Connection`, so the dictionary can
/// operate inside an open transaction when reconciliation requires it.
pub struct TagDictionary<'conn> {
    conn: &'conn Connection,
}

impl<'conn> TagDictionary<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Returns the subset of `names` already present in the dictionary.
    ///
    /// No side effects; case-sensitive exact match.
    pub fn find_existing(&self, names: &[String]) -> RepoResult<BTreeSet<String>> {
        if names.is_empty() {
            return Ok(BTreeSet::new());
        }

        let sql = format!(
            "SELECT name FROM tags WHERE name IN ({});",
            placeholders(names.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_names(names)))?;

        let mut existing = BTreeSet::new();
        while let Some(row) = rows.next()? {
            existing.insert(row.get::<_, String>("name")?);
        }
        Ok(existing)
    }

    /// Inserts the given names into the dictionary.
    ///
    /// Callers are expected to pass only names absent from the dictionary
    /// (computed via `find_existing`); `INSERT OR IGNORE` keeps the call
    /// idempotent if that discipline slips.
    pub fn create_missing(&self, names: &[String]) -> RepoResult<()> {
        for name in names {
            self.conn
                .execute("INSERT OR IGNORE INTO tags (name) VALUES (?1);", [name])?;
        }
        Ok(())
    }

    /// Resolves every requested name to its dictionary entry.
    ///
    /// A name that fails to resolve after `create_missing` indicates a logic
    /// or concurrency defect and surfaces as `RepoError::TagResolution`.
    pub fn resolve_all(&self, names: &[String]) -> RepoResult<Vec<Tag>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name FROM tags WHERE name IN ({}) ORDER BY name ASC;",
            placeholders(names.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_names(names)))?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(Tag {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }

        let resolved: BTreeSet<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
        for name in names {
            if !resolved.contains(name.as_str()) {
                return Err(RepoError::TagResolution(name.clone()));
            }
        }

        Ok(tags)
    }

    /// Returns every dictionary entry sorted by name.
    pub fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(Tag {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(tags)
    }
}

/// Trims and deduplicates requested tag names, preserving case.
///
/// Blank entries are dropped; duplicates collapse because the association
/// set is a set, not a multiset.
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for name in names {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            unique.insert(trimmed.to_string());
        }
    }
    unique.into_iter().collect()
}

fn placeholders(count: usize) -> String {
    let mut out = String::with_capacity(count * 2);
    for index in 0..count {
        if index > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}

fn bind_names(names: &[String]) -> Vec<Value> {
    names
        .iter()
        .map(|name| Value::Text(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag_names, placeholders};

    #[test]
    fn normalize_trims_dedupes_and_keeps_case() {
        let input = vec![
            " beach ".to_string(),
            "beach".to_string(),
            "Beach".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(
            normalize_tag_names(&input),
            vec!["Beach".to_string(), "beach".to_string()]
        );
    }

    #[test]
    fn placeholders_are_comma_separated() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
    }
}
