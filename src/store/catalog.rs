use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Transaction, params};

use crate::model::{MovieId, MovieRef, SimilarityEntry};
use crate::util::now_utc_string;

// Replaces any list already stored for the same item.
pub fn import_similarity(
    connection: &mut Connection,
    entries: &[SimilarityEntry],
) -> Result<usize> {
    let tx = connection
        .transaction()
        .context("failed to start similarity import transaction")?;
    let imported_at = now_utc_string();
    let mut neighbor_rows = 0usize;

    for entry in entries {
        upsert_movie(&tx, entry.id, &entry.title, entry.poster_path.as_deref(), true)?;

        tx.execute(
            "DELETE FROM similar_movies WHERE movie_id = ?1",
            params![entry.id],
        )?;
        tx.execute(
            "
            INSERT INTO similarity_items(movie_id, imported_at) VALUES(?1, ?2)
            ON CONFLICT(movie_id) DO UPDATE SET imported_at=excluded.imported_at
            ",
            params![entry.id, imported_at],
        )?;

        for (position, neighbor) in entry.similar.iter().enumerate() {
            upsert_movie(
                &tx,
                neighbor.neighbor_id,
                &neighbor.title,
                neighbor.poster_path.as_deref(),
                false,
            )?;
            tx.execute(
                "
                INSERT INTO similar_movies(movie_id, position, neighbor_id, title, poster_path, similarity_score)
                VALUES(?1, ?2, ?3, ?4, ?5, ?6)
                ",
                params![
                    entry.id,
                    position as i64,
                    neighbor.neighbor_id,
                    neighbor.title,
                    neighbor.poster_path,
                    neighbor.similarity_score,
                ],
            )
            .with_context(|| {
                format!(
                    "failed to insert neighbor {} for movie {}",
                    neighbor.neighbor_id, entry.id
                )
            })?;
            neighbor_rows += 1;
        }
    }

    tx.commit()
        .context("failed to commit similarity import transaction")?;
    Ok(neighbor_rows)
}

pub fn import_top_list(connection: &mut Connection, movies: &[MovieRef]) -> Result<usize> {
    let tx = connection
        .transaction()
        .context("failed to start top list import transaction")?;

    tx.execute("DELETE FROM top_list", [])?;
    for (position, movie) in movies.iter().enumerate() {
        upsert_movie(&tx, movie.id, &movie.title, movie.poster_path.as_deref(), true)?;
        tx.execute(
            "INSERT INTO top_list(position, movie_id) VALUES(?1, ?2)",
            params![position as i64, movie.id],
        )?;
    }

    tx.commit()
        .context("failed to commit top list import transaction")?;
    Ok(movies.len())
}

fn upsert_movie(
    tx: &Transaction<'_>,
    movie_id: MovieId,
    title: &str,
    poster_path: Option<&str>,
    overwrite: bool,
) -> Result<()> {
    let sql = if overwrite {
        "
        INSERT INTO movies(movie_id, title, poster_path) VALUES(?1, ?2, ?3)
        ON CONFLICT(movie_id) DO UPDATE SET
          title=excluded.title,
          poster_path=COALESCE(excluded.poster_path, movies.poster_path)
        "
    } else {
        "
        INSERT INTO movies(movie_id, title, poster_path) VALUES(?1, ?2, ?3)
        ON CONFLICT(movie_id) DO NOTHING
        "
    };
    tx.execute(sql, params![movie_id, title, poster_path])
        .with_context(|| format!("failed to upsert movie {movie_id}"))?;
    Ok(())
}

pub fn load_top_list(connection: &Connection) -> Result<Vec<MovieRef>> {
    let mut statement = connection.prepare(
        "
        SELECT m.movie_id, m.title, m.poster_path
        FROM top_list t
        JOIN movies m ON m.movie_id = t.movie_id
        ORDER BY t.position ASC
        ",
    )?;

    let mut rows = statement.query([])?;
    let mut out = Vec::<MovieRef>::new();
    while let Some(row) = rows.next()? {
        out.push(MovieRef {
            id: row.get(0)?,
            title: row.get(1)?,
            poster_path: row.get(2)?,
        });
    }

    Ok(out)
}

pub fn catalog_movie(connection: &Connection, movie_id: MovieId) -> Result<Option<MovieRef>> {
    let movie = connection
        .query_row(
            "SELECT movie_id, title, poster_path FROM movies WHERE movie_id = ?1",
            params![movie_id],
            |row| {
                Ok(MovieRef {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    poster_path: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(movie)
}

pub fn record_import_metadata(connection: &Connection, key: &str, value: &str) -> Result<()> {
    connection
        .execute(
            "
            INSERT INTO metadata(key, value) VALUES(?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value=excluded.value
            ",
            params![key, value],
        )
        .with_context(|| format!("failed to record metadata key {key}"))?;
    Ok(())
}
