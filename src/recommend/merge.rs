use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{NeighborLookup, RecommendError};
use crate::model::{Contribution, MovieId, MovieRef, NeighborRecord, SeedSelection};

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) movie: MovieRef,
    pub(crate) contributions: Vec<Contribution>,
}

impl Candidate {
    fn from_neighbor(neighbor: &NeighborRecord, contribution: Contribution) -> Self {
        Self {
            movie: MovieRef {
                id: neighbor.neighbor_id,
                title: neighbor.title.clone(),
                poster_path: neighbor.poster_path.clone(),
            },
            contributions: vec![contribution],
        }
    }

    pub(crate) fn contribution_count(&self) -> usize {
        self.contributions.len()
    }

    pub(crate) fn local_average(&self) -> f64 {
        let total: f64 = self
            .contributions
            .iter()
            .map(|contribution| contribution.similarity_score)
            .sum();
        total / self.contributions.len() as f64
    }
}

#[derive(Debug, Default)]
pub(crate) struct CandidatePool {
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) all_scores: Vec<f64>,
}

pub(crate) fn merge_candidates<L>(
    seeds: &[SeedSelection],
    lookup: &L,
) -> Result<CandidatePool, RecommendError>
where
    L: NeighborLookup + ?Sized,
{
    let seed_ids: HashSet<MovieId> = seeds.iter().map(|seed| seed.item_id).collect();
    let mut positions = HashMap::<MovieId, usize>::new();
    let mut pool = CandidatePool::default();

    for seed in seeds {
        let neighbors = lookup.neighbors(seed.item_id)?;
        let mut excluded = 0usize;

        for neighbor in &neighbors {
            if seed_ids.contains(&neighbor.neighbor_id) {
                excluded += 1;
                continue;
            }

            let contribution = Contribution {
                source_item_id: seed.item_id,
                source_title: seed.title.clone(),
                similarity_score: neighbor.similarity_score,
                poster_path: seed.poster_path.clone(),
            };

            match positions.get(&neighbor.neighbor_id) {
                Some(&position) => pool.candidates[position].contributions.push(contribution),
                None => {
                    positions.insert(neighbor.neighbor_id, pool.candidates.len());
                    pool
                        .candidates
                        .push(Candidate::from_neighbor(neighbor, contribution));
                }
            }
            pool.all_scores.push(neighbor.similarity_score);
        }

        debug!(
            seed_id = seed.item_id,
            neighbor_count = neighbors.len(),
            excluded,
            candidate_count = pool.candidates.len(),
            "merged seed neighbors"
        );
    }

    Ok(pool)
}
