use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::store::{load_metadata, open_read_only, store_counts};

pub fn run(args: StatusArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();

    info!(cache_root = %args.store.cache_root.display(), "status requested");

    if !db_path.exists() {
        warn!(path = %db_path.display(), "database file missing; run `seedrec import` first");
        return Ok(());
    }

    let connection = open_read_only(&db_path)?;
    let counts = store_counts(&connection)?;
    let schema_version = load_metadata(&connection, "db_schema_version")?.unwrap_or_default();

    info!(
        path = %db_path.display(),
        schema_version = %schema_version,
        movies = counts.movies,
        top_list = counts.top_list,
        indexed_items = counts.indexed_items,
        neighbor_rows = counts.neighbor_rows,
        users = counts.users,
        visits = counts.visits,
        "database status"
    );

    let Some(imported_at) = load_metadata(&connection, "similarity_imported_at")? else {
        warn!("no similarity import recorded");
        return Ok(());
    };
    let source_path = load_metadata(&connection, "similarity_path")?.unwrap_or_default();
    let source_sha256 = load_metadata(&connection, "similarity_sha256")?.unwrap_or_default();

    info!(
        imported_at = %imported_at,
        path = %source_path,
        sha256 = %source_sha256,
        "last similarity import"
    );

    Ok(())
}
