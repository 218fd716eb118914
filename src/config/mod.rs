//! Configuration management for Lumen
//!
//! Configuration is read from a TOML file, then environment overrides are
//! applied, then the result is validated as a whole.

use crate::error::{LumenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta", default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub triage: TriageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            schema_version: "1.0.0".to_string(),
            created_at: current_timestamp(),
            last_modified: current_timestamp(),
        }
    }
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Embedding backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Load the embedding model at startup; when false search is lexical only
    pub enabled: bool,
    pub model: String,
    /// Catalog entries embedded per backend call during index construction
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "paraphrase-multilingual-MiniLM-L12-v2".to_string(),
            batch_size: 32,
        }
    }
}

/// Where jurisdiction filters apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionFilter {
    /// Filter both vector and lexical results
    Uniform,
    /// Filter lexical results only; vector results are returned unfiltered
    LexicalOnly,
}

impl std::str::FromStr for JurisdictionFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "lexical_only" => Ok(Self::LexicalOnly),
            other => Err(format!(
                "expected 'uniform' or 'lexical_only', got '{}'",
                other
            )),
        }
    }
}

/// Scheme retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of results returned by either search path
    pub top_k: usize,
    pub jurisdiction_filter: JurisdictionFilter,
    /// Answer with lexical matches when the embedding call or index search fails
    pub fallback_on_error: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            jurisdiction_filter: JurisdictionFilter::Uniform,
            fallback_on_error: true,
        }
    }
}

/// How triage keywords are matched against symptom text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatching {
    /// Plain substring containment ("painting" matches "pain")
    Substring,
    /// Keywords must start and end on word boundaries
    WordBoundary,
}

impl std::str::FromStr for KeywordMatching {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "substring" => Ok(Self::Substring),
            "word_boundary" => Ok(Self::WordBoundary),
            other => Err(format!(
                "expected 'substring' or 'word_boundary', got '{}'",
                other
            )),
        }
    }
}

/// Triage classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    pub matching: KeywordMatching,
    #[serde(default)]
    pub extra_emergency_keywords: Vec<String>,
    #[serde(default)]
    pub extra_urgent_keywords: Vec<String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            matching: KeywordMatching::Substring,
            extra_emergency_keywords: Vec::new(),
            extra_urgent_keywords: Vec::new(),
        }
    }
}

/// Knowledge catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML file replacing the built-in scheme dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LumenError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LumenError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let config: Config = toml::from_str(&content)?;

        config.finish(std::env::vars())
    }

    /// Load configuration from a file, or start from defaults when it is missing
    ///
    /// Environment overrides are applied and validated on both paths.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Self::load_or_default_with(path, std::env::vars())
    }

    fn load_or_default_with<I>(path: &Path, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if path.exists() {
            return Self::load(path);
        }

        tracing::warn!(
            "Config file not found at {:?}, using defaults. Run 'lumen config init' to create one.",
            path
        );
        Config::default().finish(vars)
    }

    fn finish<I>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.apply_overrides(vars);
        ConfigValidator::validate(&self)?;
        Ok(self)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| LumenError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: LUMEN_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::vars());
    }

    fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix("LUMEN_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        let invalid = |message: String| LumenError::InvalidConfigValue {
            path: path.to_string(),
            message,
        };

        match path {
            "EMBEDDING__ENABLED" => {
                self.embedding.enabled = value
                    .parse()
                    .map_err(|_| invalid(format!("Cannot parse '{}' as boolean", value)))?;
            }
            "EMBEDDING__MODEL" => {
                self.embedding.model = value.to_string();
            }
            "RETRIEVAL__TOP_K" => {
                self.retrieval.top_k = value
                    .parse()
                    .map_err(|_| invalid(format!("Cannot parse '{}' as integer", value)))?;
            }
            "RETRIEVAL__JURISDICTION_FILTER" => {
                self.retrieval.jurisdiction_filter = value.parse().map_err(invalid)?;
            }
            "TRIAGE__MATCHING" => {
                self.triage.matching = value.parse().map_err(invalid)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| LumenError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("lumen").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.embedding.enabled);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(
            config.retrieval.jurisdiction_filter,
            JurisdictionFilter::Uniform
        );
        assert_eq!(config.triage.matching, KeywordMatching::Substring);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut config = Config::default();
        config.retrieval.jurisdiction_filter = JurisdictionFilter::LexicalOnly;
        config.triage.extra_urgent_keywords = vec!["cough".to_string()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(
            loaded.retrieval.jurisdiction_filter,
            JurisdictionFilter::LexicalOnly
        );
        assert_eq!(loaded.triage.extra_urgent_keywords, vec!["cough"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[retrieval]\ntop_k = 3\njurisdiction_filter = \"uniform\"\nfallback_on_error = false\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.retrieval.top_k, 3);
        assert!(!config.retrieval.fallback_on_error);
        assert_eq!(config.meta.schema_version, "1.0.0");
        assert_eq!(config.embedding.batch_size, 32);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Path::new("/nonexistent/lumen.toml"));
        assert!(matches!(result, Err(LumenError::ConfigNotFound { .. })));
    }

    fn overrides(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");

        let config = Config::load_or_default_with(
            &path,
            overrides(&[("LUMEN_RETRIEVAL__TOP_K", "3"), ("HOME", "/root")]),
        )
        .unwrap();
        assert_eq!(config.retrieval.top_k, 3);
        assert!(config.embedding.enabled);
    }

    #[test]
    fn test_missing_file_overrides_are_validated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");

        for top_k in ["0", "500"] {
            let result = Config::load_or_default_with(
                &path,
                overrides(&[("LUMEN_RETRIEVAL__TOP_K", top_k)]),
            );
            assert!(
                matches!(result, Err(LumenError::ConfigValidation { .. })),
                "top_k={} should be rejected",
                top_k
            );
        }
    }

    #[test]
    fn test_env_value_parsing() {
        let mut config = Config::default();
        config
            .set_value_from_env("TRIAGE__MATCHING", "word_boundary")
            .unwrap();
        assert_eq!(config.triage.matching, KeywordMatching::WordBoundary);

        config
            .set_value_from_env("EMBEDDING__ENABLED", "false")
            .unwrap();
        assert!(!config.embedding.enabled);

        assert!(config
            .set_value_from_env("RETRIEVAL__JURISDICTION_FILTER", "sometimes")
            .is_err());
        assert!(config.set_value_from_env("RETRIEVAL__TOP_K", "many").is_err());
    }
}
