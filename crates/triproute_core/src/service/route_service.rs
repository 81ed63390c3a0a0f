//! Route synchronization engine.
//!
//! # Responsibility
//! - Orchestrate owner/place resolution, atomic aggregate persistence and
//!   tag reconciliation into caller-facing operations.
//!
//! # Invariants
//! - A save with any unresolvable stop persists nothing.
//! - The tag list supplied to an update is authoritative: absent means
//!   empty, and the stored association set mirrors it exactly afterwards.
//! - Input shape is validated before any persistence attempt.

use crate::model::route::{RouteDraft, RouteHeadUpdate, RouteId, RouteValidationError, RouteView};
use crate::model::user::UserId;
use crate::repo::place_repo::PlaceCatalog;
use crate::repo::route_repo::{RepoError, RouteRepository};
use crate::repo::tag_repo::normalize_tag_names;
use crate::repo::user_repo::UserDirectory;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Service error for route use-cases.
#[derive(Debug)]
pub enum RouteServiceError {
    /// Malformed write model (blank required field).
    Validation(RouteValidationError),
    /// Owner e-mail does not look like an e-mail address.
    InvalidEmail(String),
    /// Tag input contains blank values.
    InvalidTag(String),
    /// Owner e-mail does not resolve in the user directory.
    UserNotFound(String),
    /// A stop's catalog id does not resolve in the place catalog.
    PlaceNotFound(String),
    /// Target route does not exist.
    RouteNotFound(RouteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for RouteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidEmail(email) => write!(f, "invalid owner e-mail: `{email}`"),
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::UserNotFound(email) => write!(f, "user not found: {email}"),
            Self::PlaceNotFound(content_id) => {
                write!(f, "place with catalog id {content_id} not found")
            }
            Self::RouteNotFound(id) => write!(f, "route not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RouteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RouteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::RouteNotFound(id) => Self::RouteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<RouteValidationError> for RouteServiceError {
    fn from(value: RouteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Synchronization engine facade over one backing store.
///
/// The store supplies all three collaborator contracts: the aggregate
/// store plus the read-only place catalog and user directory boundaries.
pub struct RouteService<S>
where
    S: RouteRepository + PlaceCatalog + UserDirectory,
{
    store: S,
}

impl<S> RouteService<S>
where
    S: RouteRepository + PlaceCatalog + UserDirectory,
{
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saves a new route for the owner resolved by e-mail.
    ///
    /// Every stop must resolve in the place catalog; one unresolvable
    /// catalog id aborts the whole save before anything persists.
    pub fn save_route(
        &mut self,
        draft: &RouteDraft,
        owner_email: &str,
    ) -> Result<RouteId, RouteServiceError> {
        let owner = self.resolve_owner(owner_email)?;
        draft.validate()?;

        let mut places = Vec::with_capacity(draft.stops.len());
        for stop in &draft.stops {
            let place = self
                .store
                .find_by_catalog_id(stop)?
                .ok_or_else(|| RouteServiceError::PlaceNotFound(stop.clone()))?;
            places.push(place);
        }

        let route_id = self.store.save_route(draft, owner, &places)?;
        Ok(route_id)
    }

    /// Lists every route of the owner, fully denormalized, without the
    /// free-text body. Zero saved routes yields an empty list.
    pub fn get_my_routes(&self, owner_email: &str) -> Result<Vec<RouteView>, RouteServiceError> {
        let owner = self.resolve_owner(owner_email)?;
        Ok(self.store.list_routes_for_user(owner)?)
    }

    /// Loads one route view including the free-text body.
    pub fn get_route(&self, id: RouteId) -> Result<RouteView, RouteServiceError> {
        self.store
            .get_route(id)?
            .ok_or(RouteServiceError::RouteNotFound(id))
    }

    /// Updates head scalars and reconciles the tag set.
    ///
    /// An absent tag list is treated as empty: updates are always
    /// authoritative for the full tag set, never "leave unchanged".
    pub fn update_route_head(&mut self, update: &RouteHeadUpdate) -> Result<(), RouteServiceError> {
        update.validate()?;

        let requested = update.tags.clone().unwrap_or_default();
        for tag in &requested {
            if tag.trim().is_empty() {
                return Err(RouteServiceError::InvalidTag(tag.clone()));
            }
        }
        let normalized = normalize_tag_names(&requested);

        self.store.update_head(update, &normalized)?;
        Ok(())
    }

    fn resolve_owner(&self, owner_email: &str) -> Result<UserId, RouteServiceError> {
        if !EMAIL_RE.is_match(owner_email) {
            return Err(RouteServiceError::InvalidEmail(owner_email.to_string()));
        }
        let user = self
            .store
            .find_by_email(owner_email)?
            .ok_or_else(|| RouteServiceError::UserNotFound(owner_email.to_string()))?;
        Ok(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::EMAIL_RE;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(EMAIL_RE.is_match("a@x.com"));
        assert!(EMAIL_RE.is_match("first.last@sub.example.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!EMAIL_RE.is_match("not-an-email"));
        assert!(!EMAIL_RE.is_match("two@@x.com"));
        assert!(!EMAIL_RE.is_match("spaced user@x.com"));
    }
}
