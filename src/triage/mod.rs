//! Keyword-driven triage classification of symptom text
//!
//! Emergency keywords are checked before urgent ones, so text mentioning both
//! is always classified Red. Classification never fails and makes no model call.

use crate::config::{KeywordMatching, TriageConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const EMERGENCY_KEYWORDS: [&str; 5] = [
    "chest pain",
    "difficulty breathing",
    "unconscious",
    "severe bleeding",
    "head injury",
];

pub const URGENT_KEYWORDS: [&str; 5] = ["fever", "pain", "swelling", "rash", "nausea"];

/// Urgency level, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    Green,
    Yellow,
    Red,
}

impl TriageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Green => "Green",
            TriageLevel::Yellow => "Yellow",
            TriageLevel::Red => "Red",
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Substring(Vec<String>),
    WordBoundary(Vec<Regex>),
}

impl Matcher {
    fn build(keywords: Vec<String>, matching: KeywordMatching) -> Self {
        match matching {
            KeywordMatching::Substring => Matcher::Substring(keywords),
            KeywordMatching::WordBoundary => Matcher::WordBoundary(
                keywords
                    .iter()
                    .filter_map(|keyword| {
                        let pattern = format!(r"\b{}\b", regex::escape(keyword));
                        match Regex::new(&pattern) {
                            Ok(re) => Some(re),
                            Err(e) => {
                                tracing::warn!("Skipping triage keyword '{}': {}", keyword, e);
                                None
                            }
                        }
                    })
                    .collect(),
            ),
        }
    }

    fn is_match(&self, text_lower: &str) -> bool {
        match self {
            Matcher::Substring(keywords) => keywords.iter().any(|k| text_lower.contains(k.as_str())),
            Matcher::WordBoundary(patterns) => patterns.iter().any(|re| re.is_match(text_lower)),
        }
    }
}

/// Rule-based triage classifier
#[derive(Debug, Clone)]
pub struct TriageClassifier {
    emergency: Matcher,
    urgent: Matcher,
}

impl TriageClassifier {
    pub fn new(config: &TriageConfig) -> Self {
        let keywords = |builtin: &[&str], extra: &[String]| -> Vec<String> {
            builtin
                .iter()
                .map(|k| k.to_string())
                .chain(extra.iter().map(|k| k.trim().to_lowercase()))
                .filter(|k| !k.is_empty())
                .collect()
        };

        Self {
            emergency: Matcher::build(
                keywords(&EMERGENCY_KEYWORDS, &config.extra_emergency_keywords),
                config.matching,
            ),
            urgent: Matcher::build(
                keywords(&URGENT_KEYWORDS, &config.extra_urgent_keywords),
                config.matching,
            ),
        }
    }

    pub fn classify(&self, symptom_text: &str) -> TriageLevel {
        let text = symptom_text.to_lowercase();

        if self.emergency.is_match(&text) {
            TriageLevel::Red
        } else if self.urgent.is_match(&text) {
            TriageLevel::Yellow
        } else {
            TriageLevel::Green
        }
    }
}

impl Default for TriageClassifier {
    fn default() -> Self {
        Self::new(&TriageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_takes_precedence() {
        let classifier = TriageClassifier::default();
        assert_eq!(
            classifier.classify("severe chest pain and mild fever"),
            TriageLevel::Red
        );
    }

    #[test]
    fn test_levels() {
        let classifier = TriageClassifier::default();
        assert_eq!(classifier.classify("I have a mild fever"), TriageLevel::Yellow);
        assert_eq!(classifier.classify("I feel great today"), TriageLevel::Green);
        assert_eq!(classifier.classify("He is UNCONSCIOUS"), TriageLevel::Red);
        assert_eq!(classifier.classify(""), TriageLevel::Green);
    }

    #[test]
    fn test_substring_matching_is_not_word_aware() {
        let classifier = TriageClassifier::default();
        assert_eq!(classifier.classify("I was painting"), TriageLevel::Yellow);
    }

    #[test]
    fn test_word_boundary_matching() {
        let classifier = TriageClassifier::new(&TriageConfig {
            matching: KeywordMatching::WordBoundary,
            ..TriageConfig::default()
        });
        assert_eq!(classifier.classify("I was painting"), TriageLevel::Green);
        assert_eq!(classifier.classify("sharp pain in my knee"), TriageLevel::Yellow);
        assert_eq!(classifier.classify("Chest pain!"), TriageLevel::Red);
    }

    #[test]
    fn test_extra_keywords() {
        let classifier = TriageClassifier::new(&TriageConfig {
            extra_emergency_keywords: vec!["Snake Bite".to_string()],
            extra_urgent_keywords: vec!["cough".to_string()],
            ..TriageConfig::default()
        });
        assert_eq!(classifier.classify("snake bite on the ankle"), TriageLevel::Red);
        assert_eq!(classifier.classify("dry cough"), TriageLevel::Yellow);
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(TriageLevel::Green < TriageLevel::Yellow);
        assert!(TriageLevel::Yellow < TriageLevel::Red);
        assert_eq!(TriageLevel::Red.to_string(), "Red");
        assert_eq!(
            serde_json::to_string(&TriageLevel::Yellow).unwrap(),
            "\"Yellow\""
        );
    }
}
