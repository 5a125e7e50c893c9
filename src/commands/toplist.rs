use std::io::{self, Write};

use anyhow::{Context, Result};
use regex::RegexBuilder;
use tracing::info;

use crate::cli::TopListArgs;
use crate::model::MovieRef;
use crate::store::{load_top_list, open_read_only};
use crate::util::write_json_stdout;

pub fn run(args: TopListArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    let connection = open_read_only(&db_path)?;

    let movies = filter_titles(load_top_list(&connection)?, args.filter.as_deref())?;
    info!(
        filter = ?args.filter,
        returned = movies.len(),
        "top list loaded"
    );

    if args.json {
        return write_json_stdout(&movies);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for (index, movie) in movies.iter().enumerate() {
        writeln!(output, "{}.\t{}\t(id {})", index + 1, movie.title, movie.id)?;
    }
    output.flush()?;
    Ok(())
}

fn filter_titles(movies: Vec<MovieRef>, pattern: Option<&str>) -> Result<Vec<MovieRef>> {
    let Some(pattern) = pattern.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(movies);
    };

    let matcher = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("invalid title filter: {pattern}"))?;

    Ok(movies
        .into_iter()
        .filter(|movie| matcher.is_match(&movie.title))
        .collect())
}
