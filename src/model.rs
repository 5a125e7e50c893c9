use serde::{Deserialize, Serialize};

pub type MovieId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSelection {
    pub item_id: MovieId,
    pub title: String,
    #[serde(default, alias = "poster_path")]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborRecord {
    pub neighbor_id: MovieId,
    pub title: String,
    #[serde(default, alias = "poster_path")]
    pub poster_path: Option<String>,
    pub similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRef {
    pub id: MovieId,
    pub title: String,
    #[serde(default, alias = "poster_path")]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub source_item_id: MovieId,
    pub source_title: String,
    pub similarity_score: f64,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub movie: MovieRef,
    pub contribution_count: usize,
    pub contributions: Vec<Contribution>,
    pub weighted_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub selected_count: usize,
    pub ranked_list: Vec<RankedCandidate>,
    pub ranked_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityEntry {
    pub id: MovieId,
    pub title: String,
    #[serde(default, alias = "poster_path")]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub similar: Vec<NeighborRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: i64,
    pub created_at: String,
    pub test_group: String,
    pub selected_movies: Vec<SeedSelection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub generated_at: String,
    pub similarity_path: String,
    pub similarity_sha256: String,
    pub indexed_items: usize,
    pub neighbor_rows: usize,
    pub top_list_path: Option<String>,
    pub top_list_sha256: Option<String>,
    pub top_list_entries: usize,
    pub catalog_movies: i64,
}
