/// Exact nearest-neighbor index over catalog embeddings
use ndarray::{Array2, ArrayView1};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorIndexError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid index shape: {0}")]
    Shape(String),
}

/// A neighbor returned by [`VectorIndex::search`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Catalog position of the matched record
    pub position: usize,
    /// Squared Euclidean distance to the query (smaller is more similar)
    pub distance: f32,
}

/// Flat index using squared Euclidean distance
///
/// Row `i` holds the embedding of catalog record `i`. The index is built once
/// and is read-only afterwards, so it can be shared across requests without
/// locking. Search is exhaustive, which keeps results exact and reproducible.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    vectors: Array2<f32>,
}

impl VectorIndex {
    /// Index with no entries
    pub fn empty(dimension: usize) -> Self {
        Self {
            vectors: Array2::zeros((0, dimension)),
        }
    }

    /// Build an index from embeddings in catalog order
    ///
    /// Fails on the first embedding whose length differs from `dimension`.
    pub fn from_embeddings(
        dimension: usize,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self, VectorIndexError> {
        let rows = embeddings.len();
        let mut flat = Vec::with_capacity(rows * dimension);

        for embedding in embeddings {
            if embedding.len() != dimension {
                return Err(VectorIndexError::DimensionMismatch {
                    expected: dimension,
                    actual: embedding.len(),
                });
            }
            flat.extend(embedding);
        }

        let vectors = Array2::from_shape_vec((rows, dimension), flat)
            .map_err(|e| VectorIndexError::Shape(e.to_string()))?;

        Ok(Self { vectors })
    }

    /// Search for the k nearest entries
    ///
    /// Results are sorted by ascending distance, ties broken by ascending
    /// catalog position. At most `k` neighbors are returned.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, VectorIndexError> {
        if query.len() != self.dimension() {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.dimension(),
                actual: query.len(),
            });
        }

        let query = ArrayView1::from(query);
        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .outer_iter()
            .enumerate()
            .map(|(position, row)| {
                let diff = &row - &query;
                Neighbor {
                    position,
                    distance: diff.dot(&diff),
                }
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }
}
