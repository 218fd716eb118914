use crate::config::Config;
use crate::error::{LumenError, Result, ValidationError};

/// Upper bound on `retrieval.top_k`, the most results a search may return
const MAX_TOP_K: usize = 5;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_embedding(config, &mut errors);
        Self::validate_retrieval(config, &mut errors);
        Self::validate_triage(config, &mut errors);
        Self::validate_catalog(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LumenError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_embedding(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.embedding.batch_size == 0 {
            errors.push(ValidationError::new(
                "embedding.batch_size",
                "Batch size must be greater than 0",
            ));
        }

        if config.embedding.model.trim().is_empty() {
            errors.push(ValidationError::new(
                "embedding.model",
                "Model name cannot be empty",
            ));
        }
    }

    fn validate_retrieval(config: &Config, errors: &mut Vec<ValidationError>) {
        let top_k = config.retrieval.top_k;
        if !(1..=MAX_TOP_K).contains(&top_k) {
            errors.push(ValidationError::new(
                "retrieval.top_k",
                format!("top_k must be between 1 and {}, got {}", MAX_TOP_K, top_k),
            ));
        }
    }

    fn validate_triage(config: &Config, errors: &mut Vec<ValidationError>) {
        let lists = [
            (
                "triage.extra_emergency_keywords",
                &config.triage.extra_emergency_keywords,
            ),
            (
                "triage.extra_urgent_keywords",
                &config.triage.extra_urgent_keywords,
            ),
        ];

        for (path, keywords) in lists {
            // A blank keyword is a substring of every input
            if keywords.iter().any(|k| k.trim().is_empty()) {
                errors.push(ValidationError::new(path, "Keywords cannot be blank"));
            }
        }
    }

    fn validate_catalog(config: &Config, errors: &mut Vec<ValidationError>) {
        if let Some(path) = &config.catalog.path {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "catalog.path",
                    "Catalog path cannot be empty when set",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_top_k_bounds() {
        let mut config = Config::default();
        config.retrieval.top_k = 0;
        assert!(ConfigValidator::validate(&config).is_err());

        config.retrieval.top_k = 5;
        assert!(ConfigValidator::validate(&config).is_ok());

        // More than five results per search is never allowed
        config.retrieval.top_k = 6;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_blank_keyword() {
        let mut config = Config::default();
        config.triage.extra_emergency_keywords = vec!["  ".to_string()];
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.embedding.batch_size = 0;
        config.embedding.model = String::new();
        config.catalog.path = Some(PathBuf::new());

        match ConfigValidator::validate(&config) {
            Err(LumenError::ConfigValidation { errors }) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }
}
