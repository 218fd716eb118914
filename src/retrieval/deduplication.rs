//! Result deduplication by catalog position

use crate::retrieval::ScoredScheme;
use std::collections::HashSet;

/// Deduplicate results by catalog position, keeping the first occurrence
///
/// Input is expected in rank order, so the kept instance is the best ranked.
pub fn deduplicate_results(results: Vec<ScoredScheme>) -> Vec<ScoredScheme> {
    let mut seen: HashSet<usize> = HashSet::new();

    results
        .into_iter()
        .filter(|result| seen.insert(result.position))
        .collect()
}
