//! Substring search used when semantic search is unavailable

use crate::catalog::{KnowledgeStore, Scheme};
use crate::retrieval::ScoredScheme;

/// Case-insensitive substring match on a scheme's name or description
pub fn matches_query(scheme: &Scheme, query_lower: &str) -> bool {
    scheme.name.to_lowercase().contains(query_lower)
        || scheme.description.to_lowercase().contains(query_lower)
}

/// Whether a scheme passes an optional jurisdiction filter
pub fn matches_jurisdiction(scheme: &Scheme, jurisdiction: Option<&str>) -> bool {
    jurisdiction.map_or(true, |j| scheme.jurisdictions.covers(j))
}

/// Scan the catalog in order, keeping the first `limit` matches
///
/// Every result carries a relevance score of 0.0.
pub fn lexical_search(
    store: &KnowledgeStore,
    query: &str,
    jurisdiction: Option<&str>,
    limit: usize,
) -> Vec<ScoredScheme> {
    let query_lower = query.to_lowercase();

    store
        .all_records()
        .iter()
        .enumerate()
        .filter(|(_, scheme)| matches_query(scheme, &query_lower))
        .filter(|(_, scheme)| matches_jurisdiction(scheme, jurisdiction))
        .take(limit)
        .map(|(position, scheme)| ScoredScheme::from_lexical(position, scheme.clone()))
        .collect()
}
