use super::RecommendError;
use super::merge::CandidatePool;
use crate::model::RankedCandidate;

pub const MAX_RANKED: usize = 12;

// Pseudo-count `m` of the weighted rating.
const PRIOR_WEIGHT: f64 = 1.0;

pub fn weighted_rating(local_average: f64, contribution_count: usize, global_average: f64) -> f64 {
    let evidence = contribution_count as f64;
    (local_average * evidence + global_average * PRIOR_WEIGHT) / (evidence + PRIOR_WEIGHT)
}

pub(crate) fn global_average(all_scores: &[f64]) -> Result<f64, RecommendError> {
    if all_scores.is_empty() {
        return Err(RecommendError::EmptyCandidatePool);
    }
    Ok(all_scores.iter().sum::<f64>() / all_scores.len() as f64)
}

pub(crate) fn rank_candidates(
    pool: CandidatePool,
    global_average: f64,
    limit: usize,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = pool
        .candidates
        .into_iter()
        .map(|candidate| {
            let contribution_count = candidate.contribution_count();
            let weighted_rating =
                weighted_rating(candidate.local_average(), contribution_count, global_average);
            RankedCandidate {
                movie: candidate.movie,
                contribution_count,
                contributions: candidate.contributions,
                weighted_rating,
            }
        })
        .collect();

    // sort_by is stable: equal ratings keep discovery order.
    ranked.sort_by(|left, right| right.weighted_rating.total_cmp(&left.weighted_rating));
    ranked.truncate(limit.clamp(1, MAX_RANKED));
    ranked
}
