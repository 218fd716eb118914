//! Symptom chat built on an optional text-generation backend
//!
//! The triage level is always derived from the user's message by the keyword
//! classifier, whether or not a generator is available.

use crate::triage::{TriageClassifier, TriageLevel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

const BASE_PROMPT: &str =
    "You are LUMEN, a healthcare assistant. Provide empathetic, accurate medical guidance. ";

const LANGUAGE_PROMPTS: &[(&str, &str)] = &[
    ("en", BASE_PROMPT),
    ("hi", "आप LUMEN हैं, एक स्वास्थ्य सहायक। सहानुभूतिपूर्ण, सटीक चिकित्सीय मार्गदर्शन प्रदान करें। "),
    ("ta", "நீங்கள் LUMEN, ஒரு சுகாதார உதவியாளர். இரக்கமுள்ள, துல்லியமான மருத்துவ வழிகாட்டுதலை வழங்குங்கள். "),
    ("bn", "আপনি LUMEN, একজন স্বাস্থ্য সহকারী। সহানুভূতিশীল, সঠিক চিকিৎসা গাইডলাইন প্রদান করুন। "),
    ("te", "మీరు LUMEN, ఒక ఆరోగ్య సహాయకుడు. సానుభూతి, ఖచ్చితమైన వైద్య మార్గదర్శకత్వాన్ని అందించండి. "),
];

pub const FALLBACK_RESPONSE: &str = "I'm experiencing technical difficulties. Please consult a healthcare professional for immediate assistance.";

const SYMPTOM_MAX_LENGTH: usize = 200;
const CONVERSATION_MAX_LENGTH: usize = 150;
const GENERATED_CONFIDENCE: f32 = 0.85;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Text generation backend unavailable")]
    Unavailable,

    #[error("Text generation failed: {0}")]
    Failed(String),
}

/// Capability interface for a free-text generation model
pub trait TextGenerator: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, GenerationError>;
}

/// Response to a symptom description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomResponse {
    pub response: String,
    pub language: String,
    pub confidence: f32,
    pub triage_level: TriageLevel,
}

/// Symptom chat service
#[derive(Clone)]
pub struct SymptomAssistant {
    generator: Option<Arc<dyn TextGenerator>>,
    classifier: TriageClassifier,
}

impl SymptomAssistant {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, classifier: TriageClassifier) -> Self {
        Self {
            generator,
            classifier,
        }
    }

    pub fn classifier(&self) -> &TriageClassifier {
        &self.classifier
    }

    pub fn has_generator(&self) -> bool {
        self.generator
            .as_ref()
            .map(|g| g.is_available())
            .unwrap_or(false)
    }

    /// Generate triage guidance for a symptom description
    ///
    /// Without a working generator the response is a fixed referral message with
    /// zero confidence, and the triage level is raised to at least Yellow.
    pub async fn process_symptoms(
        &self,
        message: &str,
        language: &str,
        context: Option<&str>,
    ) -> SymptomResponse {
        let triage_level = self.classifier.classify(message);
        let prompt = build_symptom_prompt(message, language, context);

        match self.generate(prompt, SYMPTOM_MAX_LENGTH).await {
            Ok(response) => SymptomResponse {
                response,
                language: language.to_string(),
                confidence: GENERATED_CONFIDENCE,
                triage_level,
            },
            Err(e) => {
                log_generation_failure(&e);
                SymptomResponse {
                    response: FALLBACK_RESPONSE.to_string(),
                    language: language.to_string(),
                    confidence: 0.0,
                    triage_level: triage_level.max(TriageLevel::Yellow),
                }
            }
        }
    }

    /// Free-form healthcare conversation
    pub async fn general_conversation(&self, message: &str, language: &str) -> String {
        let prompt = format!("{}User: {}\nLUMEN:", base_prompt(language), message);

        match self.generate(prompt, CONVERSATION_MAX_LENGTH).await {
            Ok(response) => response,
            Err(e) => {
                log_generation_failure(&e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    async fn generate(&self, prompt: String, max_length: usize) -> Result<String, GenerationError> {
        let generator = match &self.generator {
            Some(generator) if generator.is_available() => Arc::clone(generator),
            _ => return Err(GenerationError::Unavailable),
        };

        tokio::task::spawn_blocking(move || generator.generate(&prompt, max_length))
            .await
            .map_err(|e| GenerationError::Failed(format!("Generation task failed: {}", e)))?
    }
}

fn log_generation_failure(err: &GenerationError) {
    match err {
        GenerationError::Unavailable => tracing::debug!("No text generator, using fallback response"),
        GenerationError::Failed(_) => tracing::warn!("{}", err),
    }
}

/// System prompt for a language tag, English when the tag is not supported
pub fn base_prompt(language: &str) -> &'static str {
    LANGUAGE_PROMPTS
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(language))
        .map(|(_, prompt)| *prompt)
        .unwrap_or(BASE_PROMPT)
}

/// Prompt asking the model for triage guidance on the given symptoms
pub fn build_symptom_prompt(message: &str, language: &str, context: Option<&str>) -> String {
    let context_part = context
        .map(|c| format!("\nContext: {}", c))
        .unwrap_or_default();
    format!(
        "{}Analyze these symptoms and provide triage guidance: {}{}\nLUMEN:",
        base_prompt(language),
        message,
        context_part
    )
}
