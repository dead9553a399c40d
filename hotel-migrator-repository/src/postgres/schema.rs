//! Table names and DDL for the inventory schema.

pub const CATEGORY_TABLE: &str = "category";
pub const CHAIN_TABLE: &str = "hotel_chain";
pub const HOTEL_TABLE: &str = "hotel";

/// Creation statements in dependency order: referenced tables first.
pub const CREATE_STATEMENTS: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS category (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hotel_chain (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hotel (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        category_id TEXT NULL REFERENCES category (id),
        chain_id TEXT NULL REFERENCES hotel_chain (id),
        location TEXT NOT NULL
    )
    "#,
];

/// Insert-if-absent statement for a `(id, name)` reference table.
pub(crate) fn insert_if_absent(table: &str) -> String {
    format!("INSERT INTO {table} (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
}

pub(crate) fn select_name(table: &str) -> String {
    format!("SELECT name FROM {table} WHERE id = $1")
}

pub(crate) const INSERT_HOTEL: &str =
    "INSERT INTO hotel (id, name, category_id, chain_id, location) VALUES ($1, $2, $3, $4, $5)";
