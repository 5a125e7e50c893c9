use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::model::{SeedSelection, UserRecord};
use crate::util::now_utc_string;

const DEFAULT_TEST_GROUP: &str = "A";

pub fn create_user(connection: &Connection) -> Result<UserRecord> {
    let created_at = now_utc_string();
    connection
        .execute(
            "INSERT INTO users(created_at, test_group) VALUES(?1, ?2)",
            params![created_at, DEFAULT_TEST_GROUP],
        )
        .context("failed to create user")?;

    Ok(UserRecord {
        user_id: connection.last_insert_rowid(),
        created_at,
        test_group: DEFAULT_TEST_GROUP.to_string(),
        selected_movies: Vec::new(),
    })
}

pub fn find_user(connection: &Connection, user_id: i64) -> Result<Option<UserRecord>> {
    let row = connection
        .query_row(
            "SELECT created_at, test_group FROM users WHERE user_id = ?1",
            params![user_id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()
        .with_context(|| format!("failed to load user {user_id}"))?;

    let Some((created_at, test_group)) = row else {
        return Ok(None);
    };

    Ok(Some(UserRecord {
        user_id,
        created_at,
        test_group,
        selected_movies: load_selection(connection, user_id)?,
    }))
}

pub fn load_selection(connection: &Connection, user_id: i64) -> Result<Vec<SeedSelection>> {
    let mut statement = connection.prepare(
        "
        SELECT movie_id, title, poster_path
        FROM user_selections
        WHERE user_id = ?1
        ORDER BY position ASC
        ",
    )?;

    let mut rows = statement.query(params![user_id])?;
    let mut out = Vec::<SeedSelection>::new();
    while let Some(row) = rows.next()? {
        out.push(SeedSelection {
            item_id: row.get(0)?,
            title: row.get(1)?,
            poster_path: row.get(2)?,
        });
    }

    Ok(out)
}

pub fn replace_selection(
    connection: &mut Connection,
    user_id: i64,
    selections: &[SeedSelection],
) -> Result<()> {
    let selected_at = now_utc_string();
    let tx = connection
        .transaction()
        .context("failed to start selection transaction")?;

    tx.execute(
        "DELETE FROM user_selections WHERE user_id = ?1",
        params![user_id],
    )?;
    for (position, selection) in selections.iter().enumerate() {
        tx.execute(
            "
            INSERT INTO user_selections(user_id, position, movie_id, title, poster_path, selected_at)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                user_id,
                position as i64,
                selection.item_id,
                selection.title,
                selection.poster_path,
                selected_at,
            ],
        )?;
    }

    tx.commit()
        .with_context(|| format!("failed to store selection for user {user_id}"))?;
    Ok(())
}

pub fn record_visit(connection: &Connection, user_id: i64, url_slug: &str) -> Result<()> {
    connection
        .execute(
            "INSERT INTO visits(user_id, url_slug, timestamp) VALUES(?1, ?2, ?3)",
            params![user_id, url_slug, now_utc_string()],
        )
        .with_context(|| format!("failed to record visit for user {user_id}"))?;
    Ok(())
}
