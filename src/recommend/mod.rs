mod error;
mod merge;
mod ranking;
mod seeds;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::model::{MovieId, NeighborRecord, Recommendations, SeedSelection};

pub use error::RecommendError;
pub use ranking::{MAX_RANKED, weighted_rating};
pub use seeds::{MAX_SEEDS, resolve_seeds};

use merge::merge_candidates;
use ranking::{global_average, rank_candidates};

// A missing entry is an error, never an empty list.
pub trait NeighborLookup {
    fn neighbors(&self, item_id: MovieId) -> Result<Vec<NeighborRecord>, RecommendError>;
}

impl NeighborLookup for HashMap<MovieId, Vec<NeighborRecord>> {
    fn neighbors(&self, item_id: MovieId) -> Result<Vec<NeighborRecord>, RecommendError> {
        self.get(&item_id)
            .cloned()
            .ok_or(RecommendError::MissingSimilarityData { item_id })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RankingConfig {
    pub max_seeds: usize,
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_seeds: MAX_SEEDS,
            limit: MAX_RANKED,
        }
    }
}

pub fn recommend<L>(
    selections: &[SeedSelection],
    lookup: &L,
    config: &RankingConfig,
) -> Result<Recommendations, RecommendError>
where
    L: NeighborLookup + ?Sized,
{
    if selections.is_empty() {
        return Err(RecommendError::NoSelection);
    }

    let seeds = resolve_seeds(selections, config.max_seeds);
    if seeds.len() < selections.len() {
        debug!(
            submitted = selections.len(),
            kept = seeds.len(),
            "seed list truncated"
        );
    }

    let pool = merge_candidates(seeds, lookup)?;
    let prior = global_average(&pool.all_scores)?;
    let candidate_count = pool.candidates.len();
    let contribution_count = pool.all_scores.len();

    let ranked_list = rank_candidates(pool, prior, config.limit);

    info!(
        seed_count = seeds.len(),
        candidate_count,
        contribution_count,
        global_average = prior,
        ranked_count = ranked_list.len(),
        "ranked recommendations"
    );

    Ok(Recommendations {
        selected_count: seeds.len(),
        ranked_count: ranked_list.len(),
        ranked_list,
    })
}
