//! Availability-aware front for the embedding backend

use super::{EmbeddingError, EmbeddingProvider};
use std::sync::Arc;

/// Wraps an optional embedding provider
///
/// A gateway without a provider is the expected degraded mode when no model
/// could be loaded at startup. Every embedding it hands out is checked against
/// the provider's declared dimension.
#[derive(Clone, Default)]
pub struct EmbeddingGateway {
    provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl EmbeddingGateway {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Gateway with no backend configured
    pub fn unavailable() -> Self {
        Self { provider: None }
    }

    pub fn is_available(&self) -> bool {
        self.provider
            .as_ref()
            .map(|p| p.is_available())
            .unwrap_or(false)
    }

    /// Output dimensionality, if a backend is configured
    pub fn dimension(&self) -> Option<usize> {
        self.provider.as_ref().map(|p| p.dimension())
    }

    pub fn model_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.model_name())
    }

    fn provider(&self) -> Result<&Arc<dyn EmbeddingProvider>, EmbeddingError> {
        match &self.provider {
            Some(provider) if provider.is_available() => Ok(provider),
            _ => Err(EmbeddingError::Unavailable),
        }
    }

    pub fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let provider = self.provider()?;
        let embedding = provider.embed(text)?;
        check_embedding(provider.dimension(), &embedding)?;
        Ok(embedding)
    }

    /// Embed every text or fail as a whole; never returns a partial batch
    pub fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let provider = self.provider()?;
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = provider.embed_batch(texts)?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::Generation(format!(
                "Embedding count mismatch: expected {}, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let dimension = provider.dimension();
        for embedding in &embeddings {
            check_embedding(dimension, embedding)?;
        }

        Ok(embeddings)
    }

    /// Embed a single text on the blocking pool
    ///
    /// The model call is the only suspension point of a search, so it runs off
    /// the async worker threads.
    pub async fn embed_one_async(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        // Checked here so an unavailable backend never reaches the pool
        self.provider()?;

        let gateway = self.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || gateway.embed_one(&text))
            .await
            .map_err(|e| EmbeddingError::Generation(format!("Embedding task failed: {}", e)))?
    }
}

impl std::fmt::Debug for EmbeddingGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingGateway")
            .field("model", &self.model_name())
            .field("available", &self.is_available())
            .finish()
    }
}

fn check_embedding(expected: usize, embedding: &[f32]) -> Result<(), EmbeddingError> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }
    if embedding.iter().any(|v| !v.is_finite()) {
        return Err(EmbeddingError::Generation(
            "Embedding contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider {
        dimension: usize,
        output_len: usize,
    }

    impl EmbeddingProvider for FixedProvider {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![0.5; self.output_len])
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_unavailable_gateway() {
        let gateway = EmbeddingGateway::unavailable();
        assert!(!gateway.is_available());
        assert_eq!(gateway.dimension(), None);
        assert_eq!(gateway.embed_one("fever"), Err(EmbeddingError::Unavailable));
        assert_eq!(
            gateway.embed_many(&["fever".to_string()]),
            Err(EmbeddingError::Unavailable)
        );
    }

    #[test]
    fn test_embed_many_empty_input() {
        let gateway = EmbeddingGateway::new(Arc::new(FixedProvider {
            dimension: 4,
            output_len: 4,
        }));
        assert_eq!(gateway.embed_many(&[]).unwrap().len(), 0);
    }

    #[test]
    fn test_dimension_enforced() {
        let gateway = EmbeddingGateway::new(Arc::new(FixedProvider {
            dimension: 4,
            output_len: 3,
        }));

        assert_eq!(
            gateway.embed_one("rash"),
            Err(EmbeddingError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(gateway
            .embed_many(&["rash".to_string(), "fever".to_string()])
            .is_err());
    }

    struct NanProvider;

    impl EmbeddingProvider for NanProvider {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![0.5, f32::NAN])
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "nan"
        }
    }

    #[test]
    fn test_non_finite_embedding_rejected() {
        let gateway = EmbeddingGateway::new(Arc::new(NanProvider));

        assert!(matches!(
            gateway.embed_one("fever"),
            Err(EmbeddingError::Generation(_))
        ));
        assert!(matches!(
            gateway.embed_many(&["fever".to_string()]),
            Err(EmbeddingError::Generation(_))
        ));
    }

    #[tokio::test]
    async fn test_embed_one_async() {
        let gateway = EmbeddingGateway::new(Arc::new(FixedProvider {
            dimension: 2,
            output_len: 2,
        }));
        let embedding = gateway.embed_one_async("nausea").await.unwrap();
        assert_eq!(embedding, vec![0.5, 0.5]);

        let unavailable = EmbeddingGateway::unavailable();
        assert_eq!(
            unavailable.embed_one_async("nausea").await,
            Err(EmbeddingError::Unavailable)
        );
    }
}
