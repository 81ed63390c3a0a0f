//! User directory accessor.
//!
//! The directory itself is externally owned: the core resolves route owners
//! by e-mail and never writes user rows.

use crate::model::user::User;
use crate::repo::route_repo::{RepoResult, SqliteRouteStore};

/// Read-only lookup contract against the external user directory.
pub trait UserDirectory {
    /// Resolves one directory entry by exact e-mail match.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
}

impl UserDirectory for SqliteRouteStore<'_> {
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, email, display_name
             FROM users
             WHERE email = ?1;",
        )?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(User {
                id: row.get("id")?,
                email: row.get("email")?,
                display_name: row.get("display_name")?,
            }));
        }

        Ok(None)
    }
}
