//! Scheme search combining vector retrieval with lexical fallback

use crate::catalog::{CatalogError, KnowledgeStore};
use crate::config::{JurisdictionFilter, RetrievalConfig};
use crate::embedding::{
    EmbeddingError, EmbeddingGateway, IndexState, VectorIndex, VectorIndexError,
};
use crate::retrieval::lexical::{lexical_search, matches_jurisdiction};
use crate::retrieval::{deduplicate_results, ScoredScheme};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(EmbeddingError),

    #[error("Vector search failed: {0}")]
    Index(#[from] VectorIndexError),

    #[error("Index refers to missing catalog entry: {0}")]
    Catalog(#[from] CatalogError),
}

/// Searches the scheme catalog
///
/// Holds only shared, read-only state and can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct SchemeRetriever {
    store: Arc<KnowledgeStore>,
    gateway: EmbeddingGateway,
    index: IndexState,
    config: RetrievalConfig,
}

impl SchemeRetriever {
    pub fn new(
        store: Arc<KnowledgeStore>,
        gateway: EmbeddingGateway,
        index: IndexState,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            index,
            config,
        }
    }

    pub fn index_state(&self) -> &IndexState {
        &self.index
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Search schemes for a free-text query
    ///
    /// Uses the vector index when both the index and the embedding backend are
    /// available, otherwise substring matching. Both paths return at most
    /// `top_k` distinct schemes. An empty catalog yields an empty list.
    pub async fn search_schemes(
        &self,
        query: &str,
        jurisdiction: Option<&str>,
    ) -> Result<Vec<ScoredScheme>, SearchError> {
        let jurisdiction = jurisdiction.map(str::trim).filter(|j| !j.is_empty());

        let index = match self.index.index() {
            Some(index) if self.gateway.is_available() => index,
            _ => {
                debug!("Vector index absent, using lexical search");
                return Ok(self.lexical(query, jurisdiction));
            }
        };

        let embedding = match self.gateway.embed_one_async(query).await {
            Ok(embedding) => embedding,
            Err(EmbeddingError::Unavailable) => {
                debug!("Embedding backend went away, using lexical search");
                return Ok(self.lexical(query, jurisdiction));
            }
            Err(e) if self.config.fallback_on_error => {
                warn!("Query embedding failed, falling back to lexical search: {}", e);
                return Ok(self.lexical(query, jurisdiction));
            }
            Err(e) => {
                warn!("Query embedding failed: {}", e);
                return Err(SearchError::RetrievalUnavailable(e));
            }
        };

        match self.vector_search(index, &embedding, jurisdiction) {
            Ok(results) => Ok(results),
            Err(SearchError::Index(e)) if self.config.fallback_on_error => {
                error!("Vector index unusable, falling back to lexical search: {}", e);
                Ok(self.lexical(query, jurisdiction))
            }
            Err(e) => {
                error!("Vector search failed: {}", e);
                Err(e)
            }
        }
    }

    fn vector_search(
        &self,
        index: &VectorIndex,
        embedding: &[f32],
        jurisdiction: Option<&str>,
    ) -> Result<Vec<ScoredScheme>, SearchError> {
        let filter = match self.config.jurisdiction_filter {
            JurisdictionFilter::Uniform => jurisdiction,
            JurisdictionFilter::LexicalOnly => None,
        };

        // Filtering can discard neighbors, so rank the whole index first
        let k = if filter.is_some() {
            index.len()
        } else {
            self.config.top_k
        };

        let mut results = Vec::new();
        for neighbor in index.search(embedding, k)? {
            let scheme = self.store.record_at(neighbor.position)?;
            if !matches_jurisdiction(scheme, filter) {
                continue;
            }
            results.push(ScoredScheme::from_vector(
                neighbor.position,
                scheme.clone(),
                neighbor.distance,
            ));
        }

        let mut results = deduplicate_results(results);
        results.truncate(self.config.top_k);

        debug!("Vector search returned {} schemes", results.len());
        Ok(results)
    }

    fn lexical(&self, query: &str, jurisdiction: Option<&str>) -> Vec<ScoredScheme> {
        lexical_search(&self.store, query, jurisdiction, self.config.top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{AbsentReason, EmbeddingProvider};
    use crate::retrieval::MatchSource;

    /// Embeds "ayushman" near the first builtin scheme and anything else far away
    struct KeywordProvider;

    impl EmbeddingProvider for KeywordProvider {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if text.is_empty() {
                return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
            }
            let lower = text.to_lowercase();
            Ok(vec![
                if lower.contains("ayushman") { 1.0 } else { 0.0 },
                if lower.contains("uttar pradesh") { 1.0 } else { 0.0 },
                if lower.contains("maharashtra") { 1.0 } else { 0.0 },
            ])
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "keyword"
        }
    }

    fn retriever(config: RetrievalConfig) -> SchemeRetriever {
        let store = Arc::new(KnowledgeStore::builtin());
        let gateway = EmbeddingGateway::new(Arc::new(KeywordProvider));
        let index = crate::embedding::IndexBuilder::new(gateway.clone(), 32).build(&store);
        SchemeRetriever::new(store, gateway, index, config)
    }

    #[tokio::test]
    async fn test_vector_path_ranks_closest_first() {
        let retriever = retriever(RetrievalConfig::default());
        assert!(retriever.index_state().is_ready());

        let results = retriever.search_schemes("Ayushman card", None).await.unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].position, 0);
        assert_eq!(results[0].relevance_score, 1.0);
        assert!(results.iter().all(|r| r.source == MatchSource::Vector));
    }

    #[tokio::test]
    async fn test_empty_query_falls_back_to_lexical() {
        let retriever = retriever(RetrievalConfig::default());
        let results = retriever.search_schemes("", None).await.unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.source == MatchSource::Lexical));
    }

    #[tokio::test]
    async fn test_embedding_error_surfaces_without_fallback() {
        let config = RetrievalConfig {
            fallback_on_error: false,
            ..RetrievalConfig::default()
        };
        let retriever = retriever(config);
        let result = retriever.search_schemes("", None).await;
        assert!(matches!(
            result,
            Err(SearchError::RetrievalUnavailable(EmbeddingError::InvalidInput(_)))
        ));
    }

    #[tokio::test]
    async fn test_absent_index_uses_lexical() {
        let store = Arc::new(KnowledgeStore::builtin());
        let retriever = SchemeRetriever::new(
            store,
            EmbeddingGateway::unavailable(),
            IndexState::Absent(AbsentReason::BackendUnavailable),
            RetrievalConfig::default(),
        );

        let results = retriever.search_schemes("ayushman", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, MatchSource::Lexical);
    }
}
