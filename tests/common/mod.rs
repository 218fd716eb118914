//! Shared fixtures for integration tests
#![allow(dead_code)]

use lumen::catalog::{Jurisdictions, KnowledgeStore, Scheme, SchemeContact};
use lumen::embedding::{EmbeddingError, EmbeddingProvider};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Deterministic provider: one axis per keyword, 1.0 when the text contains it
pub struct AxisProvider {
    axes: Vec<&'static str>,
    available: AtomicBool,
    fail_queries: bool,
    pub embed_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
}

impl AxisProvider {
    pub fn new(axes: Vec<&'static str>) -> Self {
        Self {
            axes,
            available: AtomicBool::new(true),
            fail_queries: false,
            embed_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }

    /// Catalog embedding works but every single-text call fails
    pub fn failing_queries(axes: Vec<&'static str>) -> Self {
        Self {
            fail_queries: true,
            ..Self::new(axes)
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        self.axes
            .iter()
            .map(|axis| if lower.contains(axis) { 1.0 } else { 0.0 })
            .collect()
    }
}

impl EmbeddingProvider for AxisProvider {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries {
            return Err(EmbeddingError::Generation("model timed out".to_string()));
        }
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.axes.len()
    }

    fn model_name(&self) -> &str {
        "axis"
    }
}

pub fn scheme(name: &str, description: &str, jurisdictions: Jurisdictions) -> Scheme {
    Scheme {
        name: name.to_string(),
        description: description.to_string(),
        eligibility: "Low income families".to_string(),
        coverage: "Hospitalisation".to_string(),
        jurisdictions,
        contact: SchemeContact {
            helpline: "104".to_string(),
            website: "https://example.gov.in".to_string(),
        },
    }
}

/// Seven schemes, more than one page of results
pub fn test_catalog() -> KnowledgeStore {
    KnowledgeStore::new(vec![
        scheme(
            "National Health Cover",
            "Insurance for poor families across the country",
            Jurisdictions::all(),
        ),
        scheme(
            "Maharashtra Arogya",
            "Insurance for Maharashtra families",
            Jurisdictions::new(["Maharashtra"]),
        ),
        scheme(
            "UP Swasthya",
            "Insurance for Uttar Pradesh families",
            Jurisdictions::new(["Uttar Pradesh"]),
        ),
        scheme(
            "Maternity Support",
            "Cash benefit for pregnant women",
            Jurisdictions::all(),
        ),
        scheme(
            "Kerala Karunya",
            "Insurance for Kerala families with chronic illness",
            Jurisdictions::new(["Kerala"]),
        ),
        scheme(
            "Senior Citizen Care",
            "Insurance for elderly citizens",
            Jurisdictions::all(),
        ),
        scheme(
            "Bihar Child Health",
            "Free vaccination for children",
            Jurisdictions::new(["Bihar"]),
        ),
    ])
}

/// Axes used with [`test_catalog`]
pub fn test_axes() -> Vec<&'static str> {
    vec!["insurance", "families", "maharashtra", "uttar pradesh", "pregnant", "children"]
}
