use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ImportArgs;
use crate::model::{ImportSummary, MovieRef, SimilarityEntry};
use crate::store::{import_similarity, import_top_list, open_read_write, record_import_metadata};
use crate::util::{ensure_directory, now_utc_string, read_json, sha256_file, write_json_stdout};

pub fn run(args: ImportArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    if let Some(parent) = db_path.parent().filter(|value| !value.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let entries: Vec<SimilarityEntry> = read_json(&args.similarity)?;
    if entries.is_empty() {
        bail!(
            "similarity file contains no entries: {}",
            args.similarity.display()
        );
    }
    let similarity_sha256 = sha256_file(&args.similarity)?;

    let top_list = match &args.top_list {
        Some(path) => Some((read_json::<Vec<MovieRef>>(path)?, sha256_file(path)?)),
        None => None,
    };

    let mut connection = open_read_write(&db_path)?;
    let generated_at = now_utc_string();

    let neighbor_rows = import_similarity(&mut connection, &entries)
        .with_context(|| format!("failed to import {}", args.similarity.display()))?;
    let similarity_path = args.similarity.display().to_string();
    record_import_metadata(&connection, "similarity_path", &similarity_path)?;
    record_import_metadata(&connection, "similarity_sha256", &similarity_sha256)?;
    record_import_metadata(&connection, "similarity_imported_at", &generated_at)?;
    info!(
        path = %args.similarity.display(),
        indexed_items = entries.len(),
        neighbor_rows,
        "imported similarity lists"
    );

    let mut top_list_entries = 0usize;
    let mut top_list_sha256 = None;
    if let (Some(path), Some((movies, digest))) = (&args.top_list, top_list) {
        top_list_entries = import_top_list(&mut connection, &movies)
            .with_context(|| format!("failed to import {}", path.display()))?;
        record_import_metadata(&connection, "top_list_sha256", &digest)?;
        record_import_metadata(&connection, "top_list_imported_at", &generated_at)?;
        info!(path = %path.display(), entries = top_list_entries, "imported top list");
        top_list_sha256 = Some(digest);
    }

    let catalog_movies: i64 = connection
        .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
        .context("failed to count catalog movies")?;

    let summary = ImportSummary {
        generated_at,
        similarity_path,
        similarity_sha256,
        indexed_items: entries.len(),
        neighbor_rows,
        top_list_path: args.top_list.as_ref().map(|path| path.display().to_string()),
        top_list_sha256,
        top_list_entries,
        catalog_movies,
    };

    if args.json {
        write_json_stdout(&summary)?;
    }
    info!(
        db_path = %db_path.display(),
        catalog_movies = summary.catalog_movies,
        "import completed"
    );

    Ok(())
}
