//! Embedding & vector indexing
//!
//! - `EmbeddingProvider` trait abstracts the model backend
//! - `FastEmbedProvider` runs a local multilingual MiniLM model
//! - `EmbeddingGateway` adds availability and dimension checks on top of a provider
//! - `VectorIndex` is an exact squared-Euclidean index over catalog embeddings
//! - `IndexBuilder` embeds the catalog in batches and yields an `IndexState`
mod batch;
mod gateway;
mod provider;
mod vector_index;

pub use batch::{AbsentReason, IndexBuilder, IndexState};
pub use gateway::EmbeddingGateway;
pub use provider::{EmbeddingError, EmbeddingProvider, FastEmbedProvider};
pub use vector_index::{Neighbor, VectorIndex, VectorIndexError};
