//! Shared fixtures for integration tests.
//!
//! `users` and `places` are externally owned tables; tests seed them with
//! raw SQL the same way the real directory/catalog writers would.

use rusqlite::{params, Connection};

#[allow(dead_code)]
pub fn seed_user(conn: &Connection, email: &str) -> i64 {
    conn.execute(
        "INSERT INTO users (email, display_name) VALUES (?1, ?2);",
        params![email, "Test User"],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[allow(dead_code)]
pub fn seed_place(conn: &Connection, content_id: &str, title: &str) {
    conn.execute(
        "INSERT INTO places (
            content_id, title, addr1, addr2, cat1, map_x, map_y, overview
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        params![
            content_id,
            title,
            "1 Harbor Rd",
            Option::<String>::None,
            "A01",
            129.16,
            35.15,
            "seeded catalog entry"
        ],
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
