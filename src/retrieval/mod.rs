//! Scheme retrieval
//!
//! Semantic search over the vector index with a substring fallback, plus the
//! JSON envelopes the service layer wraps results in.

mod deduplication;
mod lexical;
mod result;
mod service;

pub use deduplication::deduplicate_results;
pub use lexical::lexical_search;
pub use result::{relevance_from_distance, MatchSource, ScoredScheme};
pub use service::{SchemeRetriever, SearchError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Successful scheme search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeSearchResponse {
    pub query: String,
    pub language: String,
    pub state: Option<String>,
    pub results: Vec<ScoredScheme>,
    pub timestamp: DateTime<Utc>,
}

impl SchemeSearchResponse {
    pub fn new(
        query: impl Into<String>,
        language: impl Into<String>,
        state: Option<String>,
        results: Vec<ScoredScheme>,
    ) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            state,
            results,
            timestamp: Utc::now(),
        }
    }
}

/// Failure envelope carrying a descriptive message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn search_failed(err: &SearchError) -> Self {
        Self {
            error: format!("Search failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingError;

    #[test]
    fn test_response_envelope() {
        let response =
            SchemeSearchResponse::new("insurance", "hi", Some("Goa".to_string()), Vec::new());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["query"], "insurance");
        assert_eq!(json["language"], "hi");
        assert_eq!(json["state"], "Goa");
        assert!(json["results"].as_array().unwrap().is_empty());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_envelope() {
        let err = SearchError::RetrievalUnavailable(EmbeddingError::Unavailable);
        let response = ErrorResponse::search_failed(&err);
        assert!(response.error.starts_with("Search failed:"));
        assert!(response.error.contains("unavailable"));
    }
}
