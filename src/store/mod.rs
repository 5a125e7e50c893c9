mod catalog;
mod schema;
mod similarity;
#[cfg(test)]
mod tests;
mod users;

pub use catalog::{
    catalog_movie, import_similarity, import_top_list, load_top_list, record_import_metadata,
};
pub use schema::{load_metadata, open_read_only, open_read_write, store_counts};
pub use similarity::SqliteSimilarityIndex;
pub use users::{create_user, find_user, load_selection, record_visit, replace_selection};
