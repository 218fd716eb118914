//! Scored search results

use crate::catalog::Scheme;
use serde::{Deserialize, Serialize};

/// Which search path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Nearest-neighbor search over embeddings
    Vector,
    /// Substring matching on name and description
    Lexical,
}

/// A scheme with its relevance score and catalog position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredScheme {
    /// Catalog position of the scheme
    pub position: usize,

    #[serde(flatten)]
    pub scheme: Scheme,

    /// Relevance in [0, 1], higher is better; always 0.0 for lexical matches
    pub relevance_score: f32,

    /// Squared Euclidean distance, present for vector matches only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,

    pub source: MatchSource,
}

impl ScoredScheme {
    /// Vector match with score `max(0, 1 - distance)`
    pub fn from_vector(position: usize, scheme: Scheme, distance: f32) -> Self {
        Self {
            position,
            scheme,
            relevance_score: relevance_from_distance(distance),
            distance: Some(distance),
            source: MatchSource::Vector,
        }
    }

    pub fn from_lexical(position: usize, scheme: Scheme) -> Self {
        Self {
            position,
            scheme,
            relevance_score: 0.0,
            distance: None,
            source: MatchSource::Lexical,
        }
    }
}

/// Convert a squared distance into a relevance score clamped to [0, 1]
pub fn relevance_from_distance(distance: f32) -> f32 {
    let score = 1.0 - distance;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
