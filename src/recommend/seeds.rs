use crate::model::SeedSelection;

pub const MAX_SEEDS: usize = 25;

// Duplicate ids pass through untouched.
pub fn resolve_seeds(selections: &[SeedSelection], max_seeds: usize) -> &[SeedSelection] {
    let bound = selections.len().min(max_seeds.clamp(1, MAX_SEEDS));
    &selections[..bound]
}
