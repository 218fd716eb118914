/// Batched construction of the catalog vector index
use super::{EmbeddingError, EmbeddingGateway, VectorIndex, VectorIndexError};
use crate::catalog::KnowledgeStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Why no vector index is available
#[derive(Debug, Clone, PartialEq)]
pub enum AbsentReason {
    /// No embedding backend was configured or loaded
    BackendUnavailable,
    /// The backend was present but embedding the catalog failed
    BuildFailed(String),
}

/// Outcome of index construction, fixed for the lifetime of a service context
#[derive(Debug, Clone)]
pub enum IndexState {
    Ready(Arc<VectorIndex>),
    Absent(AbsentReason),
}

impl IndexState {
    pub fn index(&self) -> Option<&Arc<VectorIndex>> {
        match self {
            IndexState::Ready(index) => Some(index),
            IndexState::Absent(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, IndexState::Ready(_))
    }
}

#[derive(Error, Debug)]
enum BuildError {
    #[error(transparent)]
    Embedding(EmbeddingError),

    #[error(transparent)]
    Index(VectorIndexError),
}

/// Builds the vector index from a knowledge store
///
/// Matchable texts are embedded `batch_size` at a time. A single failed batch
/// aborts the whole build so the index never holds a partial catalog.
pub struct IndexBuilder {
    gateway: EmbeddingGateway,
    batch_size: usize,
}

impl IndexBuilder {
    pub fn new(gateway: EmbeddingGateway, batch_size: usize) -> Self {
        Self {
            gateway,
            batch_size: batch_size.max(1),
        }
    }

    /// Build the index, degrading to [`IndexState::Absent`] instead of failing
    pub fn build(&self, store: &KnowledgeStore) -> IndexState {
        let dimension = match self.gateway.dimension() {
            Some(dimension) if self.gateway.is_available() => dimension,
            _ => {
                info!("Embedding backend unavailable, scheme search will use lexical matching");
                return IndexState::Absent(AbsentReason::BackendUnavailable);
            }
        };

        let start = std::time::Instant::now();

        match self.embed_catalog(store, dimension) {
            Ok(index) => {
                info!(
                    "Vector index built: {} entries ({}D) in {}ms",
                    index.len(),
                    index.dimension(),
                    start.elapsed().as_millis()
                );
                IndexState::Ready(Arc::new(index))
            }
            Err(BuildError::Embedding(EmbeddingError::Unavailable)) => {
                info!("Embedding backend became unavailable during index build");
                IndexState::Absent(AbsentReason::BackendUnavailable)
            }
            Err(e) => {
                error!("Failed to build vector index: {}", e);
                IndexState::Absent(AbsentReason::BuildFailed(e.to_string()))
            }
        }
    }

    fn embed_catalog(
        &self,
        store: &KnowledgeStore,
        dimension: usize,
    ) -> Result<VectorIndex, BuildError> {
        let texts = store.matchable_texts();
        let mut embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let batch = self
                .gateway
                .embed_many(chunk)
                .map_err(BuildError::Embedding)?;
            debug!("Embedded batch of {} catalog entries", batch.len());
            embeddings.extend(batch);
        }

        VectorIndex::from_embeddings(dimension, embeddings).map_err(BuildError::Index)
    }
}
