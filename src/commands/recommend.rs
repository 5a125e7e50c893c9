use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use super::select::{require_user, store_picks};
use crate::cli::RecommendArgs;
use crate::model::Recommendations;
use crate::recommend::{RankingConfig, recommend};
use crate::store::{SqliteSimilarityIndex, load_selection, open_read_write, record_visit};
use crate::util::write_json_stdout;

pub fn run(args: RecommendArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    let mut connection = open_read_write(&db_path)?;

    let user = require_user(&connection, args.user_id)?;
    if !args.movies.is_empty() {
        store_picks(&mut connection, user.user_id, &args.movies)?;
    }
    record_visit(&connection, user.user_id, "/recommend")?;

    let selections = load_selection(&connection, user.user_id)?;
    let config = RankingConfig {
        max_seeds: args.max_seeds,
        limit: args.limit,
    };

    let index = SqliteSimilarityIndex::new(&connection);
    let recommendations = recommend(&selections, &index, &config)
        .with_context(|| format!("failed to rank recommendations for user {}", user.user_id))?;

    info!(
        user_id = user.user_id,
        selected_count = recommendations.selected_count,
        ranked_count = recommendations.ranked_count,
        "recommendation completed"
    );

    if args.json {
        write_json_stdout(&recommendations)
    } else {
        write_text_response(&recommendations)
    }
}

fn write_text_response(recommendations: &Recommendations) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Selected: {}\tRanked: {}",
        recommendations.selected_count, recommendations.ranked_count
    )?;

    for (index, candidate) in recommendations.ranked_list.iter().enumerate() {
        writeln!(
            output,
            "{}.\t{}\t(id {})\trating={:.4}\tsources={}",
            index + 1,
            candidate.movie.title,
            candidate.movie.id,
            candidate.weighted_rating,
            candidate.contribution_count,
        )?;
        for contribution in &candidate.contributions {
            writeln!(
                output,
                "\tbased on: {} (id {}) similarity={:.4}",
                contribution.source_title,
                contribution.source_item_id,
                contribution.similarity_score
            )?;
        }
    }

    output.flush()?;
    Ok(())
}
