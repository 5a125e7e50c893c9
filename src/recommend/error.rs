use thiserror::Error;

use crate::model::MovieId;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("no movies selected; pick at least one movie before requesting recommendations")]
    NoSelection,

    #[error("no similarity data for movie {item_id}")]
    MissingSimilarityData { item_id: MovieId },

    #[error("every similar movie was already selected; nothing left to rank")]
    EmptyCandidatePool,

    #[error("similarity index lookup failed for movie {item_id}")]
    Index {
        item_id: MovieId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
