use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::Serialize;

pub const DB_SCHEMA_VERSION: &str = "0.1.0";

pub fn open_read_write(db_path: &Path) -> Result<Connection> {
    let connection = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open database: {}", db_path.display()))?;

    configure_connection(&connection)?;
    ensure_schema(&connection)?;
    Ok(connection)
}

pub fn open_read_only(db_path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open database read-only: {}", db_path.display()))
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

pub(crate) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "
            CREATE TABLE IF NOT EXISTS metadata (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS movies (
              movie_id INTEGER PRIMARY KEY,
              title TEXT NOT NULL,
              poster_path TEXT
            );

            CREATE TABLE IF NOT EXISTS top_list (
              position INTEGER PRIMARY KEY,
              movie_id INTEGER NOT NULL,
              FOREIGN KEY(movie_id) REFERENCES movies(movie_id)
            );

            CREATE TABLE IF NOT EXISTS similarity_items (
              movie_id INTEGER PRIMARY KEY,
              imported_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS similar_movies (
              movie_id INTEGER NOT NULL,
              position INTEGER NOT NULL,
              neighbor_id INTEGER NOT NULL,
              title TEXT NOT NULL,
              poster_path TEXT,
              similarity_score REAL NOT NULL,
              PRIMARY KEY(movie_id, position),
              FOREIGN KEY(movie_id) REFERENCES similarity_items(movie_id)
            );

            CREATE TABLE IF NOT EXISTS users (
              user_id INTEGER PRIMARY KEY AUTOINCREMENT,
              created_at TEXT NOT NULL,
              test_group TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS user_selections (
              user_id INTEGER NOT NULL,
              position INTEGER NOT NULL,
              movie_id INTEGER NOT NULL,
              title TEXT NOT NULL,
              poster_path TEXT,
              selected_at TEXT NOT NULL,
              PRIMARY KEY(user_id, position),
              FOREIGN KEY(user_id) REFERENCES users(user_id)
            );

            CREATE TABLE IF NOT EXISTS visits (
              visit_id INTEGER PRIMARY KEY AUTOINCREMENT,
              user_id INTEGER NOT NULL,
              url_slug TEXT NOT NULL,
              timestamp TEXT NOT NULL,
              FOREIGN KEY(user_id) REFERENCES users(user_id)
            );
            ",
        )
        .context("failed to create database schema")?;

    connection.execute(
        "
        INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
        ON CONFLICT(key) DO UPDATE SET value=excluded.value
        ",
        params![DB_SCHEMA_VERSION],
    )?;

    Ok(())
}

pub fn load_metadata(connection: &Connection, key: &str) -> Result<Option<String>> {
    let value = connection
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreCounts {
    pub movies: i64,
    pub top_list: i64,
    pub indexed_items: i64,
    pub neighbor_rows: i64,
    pub users: i64,
    pub visits: i64,
}

pub fn store_counts(connection: &Connection) -> Result<StoreCounts> {
    Ok(StoreCounts {
        movies: query_count(connection, "SELECT COUNT(*) FROM movies")?,
        top_list: query_count(connection, "SELECT COUNT(*) FROM top_list")?,
        indexed_items: query_count(connection, "SELECT COUNT(*) FROM similarity_items")?,
        neighbor_rows: query_count(connection, "SELECT COUNT(*) FROM similar_movies")?,
        users: query_count(connection, "SELECT COUNT(*) FROM users")?,
        visits: query_count(connection, "SELECT COUNT(*) FROM visits")?,
    })
}

fn query_count(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection
        .query_row(sql, [], |row| row.get(0))
        .with_context(|| format!("failed to count rows: {sql}"))?;
    Ok(count)
}
