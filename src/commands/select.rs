use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use tracing::info;

use crate::cli::SelectArgs;
use crate::model::{MovieId, SeedSelection, UserRecord};
use crate::store::{catalog_movie, find_user, open_read_write, record_visit, replace_selection};

pub fn run(args: SelectArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    let mut connection = open_read_write(&db_path)?;

    let user = require_user(&connection, args.user_id)?;
    let selections = store_picks(&mut connection, user.user_id, &args.movies)?;
    record_visit(&connection, user.user_id, "/select")?;

    info!(
        user_id = user.user_id,
        selected_count = selections.len(),
        "stored selection"
    );
    Ok(())
}

pub(crate) fn require_user(connection: &Connection, user_id: i64) -> Result<UserRecord> {
    find_user(connection, user_id)?
        .with_context(|| format!("user not found: {user_id}; run `seedrec start` first"))
}

pub(crate) fn store_picks(
    connection: &mut Connection,
    user_id: i64,
    movies: &[MovieId],
) -> Result<Vec<SeedSelection>> {
    let selections = resolve_picks(connection, movies)?;
    replace_selection(connection, user_id, &selections)?;
    Ok(selections)
}

fn resolve_picks(connection: &Connection, movies: &[MovieId]) -> Result<Vec<SeedSelection>> {
    let mut selections = Vec::with_capacity(movies.len());
    for &movie_id in movies {
        let Some(movie) = catalog_movie(connection, movie_id)? else {
            bail!("movie {movie_id} is not in the catalog; import it first");
        };
        selections.push(SeedSelection {
            item_id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
        });
    }
    Ok(selections)
}
