//! Service composition root
//!
//! Owns the catalog, embedding gateway, vector index and the services built on
//! them. Request handlers receive a shared reference instead of reaching for
//! process-wide state.

use crate::assistant::{SymptomAssistant, SymptomResponse, TextGenerator};
use crate::catalog::KnowledgeStore;
use crate::config::Config;
use crate::embedding::{
    EmbeddingGateway, EmbeddingProvider, FastEmbedProvider, IndexBuilder, IndexState,
};
use crate::emergency::EmergencyGuides;
use crate::error::Result;
use crate::retrieval::{ErrorResponse, SchemeRetriever, SchemeSearchResponse};
use crate::triage::{TriageClassifier, TriageLevel};
use std::sync::Arc;

/// Explicitly constructed service state shared by all request handlers
#[derive(Clone)]
pub struct ServiceContext {
    config: Config,
    store: Arc<KnowledgeStore>,
    retriever: SchemeRetriever,
    assistant: SymptomAssistant,
    emergency: EmergencyGuides,
}

impl ServiceContext {
    /// Assemble the context from already constructed collaborators
    pub fn new(
        config: Config,
        store: KnowledgeStore,
        embedding: Option<Arc<dyn EmbeddingProvider>>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let store = Arc::new(store);
        let retriever = Self::build_retriever(&config, Arc::clone(&store), embedding);
        let assistant = SymptomAssistant::new(generator, TriageClassifier::new(&config.triage));

        Self {
            config,
            store,
            retriever,
            assistant,
            emergency: EmergencyGuides::builtin(),
        }
    }

    /// Build everything from configuration, loading the local embedding model
    ///
    /// A model that fails to load leaves scheme search in lexical mode.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = match &config.catalog.path {
            Some(path) => KnowledgeStore::load(path)?,
            None => KnowledgeStore::builtin(),
        };

        let embedding: Option<Arc<dyn EmbeddingProvider>> = if config.embedding.enabled {
            match FastEmbedProvider::new(&config.embedding.model) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(e) => {
                    tracing::warn!("Embedding model unavailable, continuing without it: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("Embedding disabled by configuration");
            None
        };

        Ok(Self::new(config, store, embedding, None))
    }

    fn build_retriever(
        config: &Config,
        store: Arc<KnowledgeStore>,
        embedding: Option<Arc<dyn EmbeddingProvider>>,
    ) -> SchemeRetriever {
        let gateway = embedding
            .map(EmbeddingGateway::new)
            .unwrap_or_else(EmbeddingGateway::unavailable);
        let index = IndexBuilder::new(gateway.clone(), config.embedding.batch_size).build(&store);

        SchemeRetriever::new(store, gateway, index, config.retrieval.clone())
    }

    /// Replace the embedding backend and rebuild the vector index
    pub fn reload_embeddings(&mut self, embedding: Option<Arc<dyn EmbeddingProvider>>) {
        tracing::info!("Reloading embedding backend");
        self.retriever = Self::build_retriever(&self.config, Arc::clone(&self.store), embedding);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn retriever(&self) -> &SchemeRetriever {
        &self.retriever
    }

    pub fn index_state(&self) -> &IndexState {
        self.retriever.index_state()
    }

    pub fn emergency_guides(&self) -> &EmergencyGuides {
        &self.emergency
    }

    /// Scheme search wrapped in the response envelope
    pub async fn search_schemes(
        &self,
        query: &str,
        language: &str,
        state: Option<&str>,
    ) -> std::result::Result<SchemeSearchResponse, ErrorResponse> {
        match self.retriever.search_schemes(query, state).await {
            Ok(results) => Ok(SchemeSearchResponse::new(
                query,
                language,
                state.map(str::to_string),
                results,
            )),
            Err(e) => {
                tracing::error!("Error searching schemes: {}", e);
                Err(ErrorResponse::search_failed(&e))
            }
        }
    }

    pub fn classify(&self, symptom_text: &str) -> TriageLevel {
        self.assistant.classifier().classify(symptom_text)
    }

    pub async fn process_symptoms(
        &self,
        message: &str,
        language: &str,
        context: Option<&str>,
    ) -> SymptomResponse {
        self.assistant
            .process_symptoms(message, language, context)
            .await
    }

    pub async fn general_conversation(&self, message: &str, language: &str) -> String {
        self.assistant.general_conversation(message, language).await
    }
}
