//! Route aggregate store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the route head and its ordered items as one transactional unit.
//! - Rebuild fully denormalized route views with explicit two-step loading
//!   (head row first, then items joined to place snapshots, then tags).
//! - Own the tag reconciliation write path for head updates.
//!
//! # Invariants
//! - A head is never visible without its items: head+items commit together.
//! - Item read order is `seq` (insertion order), always.
//! - Head update replaces the whole association set in a single transaction;
//!   a failure partway leaves the prior set intact.

use crate::db::DbError;
use crate::model::place::Place;
use crate::model::route::{
    RouteDraft, RouteHead, RouteHeadUpdate, RouteId, RouteItemView, RouteView,
};
use crate::model::user::UserId;
use crate::repo::place_repo::{parse_place_row, PLACE_COLUMNS};
use crate::repo::tag_repo::TagDictionary;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const HEAD_SELECT_SQL: &str = "SELECT
    uuid,
    user_id,
    course_name,
    town,
    tot_distance,
    content,
    created_at,
    updated_at
FROM route_heads";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for route persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    RouteNotFound(RouteId),
    /// A tag name failed to resolve right after dictionary insertion.
    TagResolution(String),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::RouteNotFound(id) => write!(f, "route not found: {id}"),
            Self::TagResolution(name) => {
                write!(f, "tag `{name}` did not resolve after dictionary insert")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted route data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the route aggregate.
pub trait RouteRepository {
    /// Persists head and all items atomically; returns the new route id.
    ///
    /// `places` must already be resolved, one per draft stop, in stop order.
    fn save_route(&mut self, draft: &RouteDraft, owner: UserId, places: &[Place])
        -> RepoResult<RouteId>;
    /// Loads the bare head record without items or tags.
    fn find_head(&self, id: RouteId) -> RepoResult<Option<RouteHead>>;
    /// Loads one fully denormalized route view, including `content`.
    fn get_route(&self, id: RouteId) -> RepoResult<Option<RouteView>>;
    /// Loads every route owned by the user; `content` is omitted.
    fn list_routes_for_user(&self, user: UserId) -> RepoResult<Vec<RouteView>>;
    /// Overwrites mutable head scalars and reconciles the tag association
    /// set against `tags` in one transaction. Items are write-once and are
    /// not touched here.
    fn update_head(&mut self, update: &RouteHeadUpdate, tags: &[String]) -> RepoResult<()>;
}

/// SQLite-backed route aggregate store.
///
/// Also implements the read-only `PlaceCatalog` and `UserDirectory`
/// contracts over the same connection, so one store value can back the
/// whole synchronization engine.
pub struct SqliteRouteStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRouteStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_route_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }
}

impl RouteRepository for SqliteRouteStore<'_> {
    fn save_route(
        &mut self,
        draft: &RouteDraft,
        owner: UserId,
        places: &[Place],
    ) -> RepoResult<RouteId> {
        let route_id = Uuid::new_v4();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO route_heads (
                uuid,
                user_id,
                course_name,
                town,
                tot_distance,
                content,
                created_at,
                updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, NULL,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
            );",
            params![
                route_id.to_string(),
                owner,
                draft.course_name.as_str(),
                draft.town.as_deref(),
                draft.tot_distance,
            ],
        )?;

        for (seq, place) in places.iter().enumerate() {
            tx.execute(
                "INSERT INTO route_items (route_uuid, place_content_id, seq)
                 VALUES (?1, ?2, ?3);",
                params![route_id.to_string(), place.content_id.as_str(), seq as i64],
            )?;
        }

        tx.commit()?;
        Ok(route_id)
    }

    fn find_head(&self, id: RouteId) -> RepoResult<Option<RouteHead>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HEAD_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_head_row(row)?));
        }

        Ok(None)
    }

    fn get_route(&self, id: RouteId) -> RepoResult<Option<RouteView>> {
        // Explicit two-step load: head row first, then items and tags.
        let Some(head) = self.find_head(id)? else {
            return Ok(None);
        };
        let items = load_items_for_route(self.conn, head.uuid)?;
        let tags = load_tags_for_route(self.conn, head.uuid)?;
        Ok(Some(denormalize(head, items, tags, true)))
    }

    fn list_routes_for_user(&self, user: UserId) -> RepoResult<Vec<RouteView>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HEAD_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([user])?;
        let mut heads = Vec::new();
        while let Some(row) = rows.next()? {
            heads.push(parse_head_row(row)?);
        }

        let mut views = Vec::new();
        for head in heads {
            let items = load_items_for_route(self.conn, head.uuid)?;
            let tags = load_tags_for_route(self.conn, head.uuid)?;
            // List projection drops the free-text body for payload economy.
            views.push(denormalize(head, items, tags, false));
        }

        Ok(views)
    }

    fn update_head(&mut self, update: &RouteHeadUpdate, tags: &[String]) -> RepoResult<()> {
        let route_id_text = update.id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "UPDATE route_heads
             SET
                course_name = ?2,
                content = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                route_id_text.as_str(),
                update.course_name.as_str(),
                update.content.as_deref(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::RouteNotFound(update.id));
        }

        // Reconciliation: grow the dictionary first, then replace the whole
        // association set. Dictionary entries are never deleted here.
        let dictionary = TagDictionary::new(&tx);
        let existing = dictionary.find_existing(tags)?;
        let missing: Vec<String> = tags
            .iter()
            .filter(|name| !existing.contains(name.as_str()))
            .cloned()
            .collect();
        dictionary.create_missing(&missing)?;
        let resolved = dictionary.resolve_all(tags)?;

        tx.execute(
            "DELETE FROM route_tags WHERE route_uuid = ?1;",
            [route_id_text.as_str()],
        )?;
        for tag in &resolved {
            tx.execute(
                "INSERT INTO route_tags (route_uuid, tag_id) VALUES (?1, ?2);",
                params![route_id_text.as_str(), tag.id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_head_row(row: &Row<'_>) -> RepoResult<RouteHead> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_route_id(&uuid_text)?;

    Ok(RouteHead {
        uuid,
        user_id: row.get("user_id")?,
        course_name: row.get("course_name")?,
        town: row.get("town")?,
        tot_distance: row.get("tot_distance")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn denormalize(
    head: RouteHead,
    items: Vec<RouteItemView>,
    tags: Vec<String>,
    include_content: bool,
) -> RouteView {
    RouteView {
        id: head.uuid,
        course_name: head.course_name,
        town: head.town,
        tot_distance: head.tot_distance,
        content: if include_content { head.content } else { None },
        created_at: head.created_at,
        updated_at: head.updated_at,
        items,
        tags,
    }
}

fn parse_route_id(value: &str) -> RepoResult<RouteId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in route_heads.uuid"))
    })
}

fn load_items_for_route(conn: &Connection, route_id: RouteId) -> RepoResult<Vec<RouteItemView>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT ri.id AS item_id, {PLACE_COLUMNS}
         FROM route_items ri
         INNER JOIN places p ON p.content_id = ri.place_content_id
         WHERE ri.route_uuid = ?1
         ORDER BY ri.seq ASC;"
    ))?;

    let mut rows = stmt.query([route_id.to_string()])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(RouteItemView {
            id: row.get("item_id")?,
            place: parse_place_row(row)?,
        });
    }
    Ok(items)
}

fn load_tags_for_route(conn: &Connection, route_id: RouteId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name
         FROM route_tags rt
         INNER JOIN tags t ON t.id = rt.tag_id
         WHERE rt.route_uuid = ?1
         ORDER BY t.name ASC;",
    )?;

    let mut rows = stmt.query([route_id.to_string()])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get::<_, String>(0)?);
    }
    Ok(tags)
}

fn ensure_route_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["users", "places", "route_heads", "route_items", "tags", "route_tags"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
