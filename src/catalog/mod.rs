//! Knowledge store of government health schemes
//!
//! The catalog is built once at startup and never mutated. A record's position
//! in the catalog is its identifier for the lifetime of the process, and the
//! vector index refers to records by that position.

mod builtin;

pub use builtin::{builtin_schemes, supported_states, SUPPORTED_STATES};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Jurisdiction sentinel meaning "available everywhere"
pub const ALL_JURISDICTIONS: &str = "all";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog position {index} out of range (catalog size {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to load catalog from {path}: {message}")]
    Load { path: PathBuf, message: String },
}

/// Contact metadata, returned verbatim and never matched against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeContact {
    pub helpline: String,
    pub website: String,
}

/// Set of jurisdictions a scheme applies to
///
/// Serialized as a plain list of names. The entry `"all"` makes the scheme
/// applicable in every jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jurisdictions(Vec<String>);

impl Jurisdictions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Jurisdictions containing only the "all" sentinel
    pub fn all() -> Self {
        Self(vec![ALL_JURISDICTIONS.to_string()])
    }

    pub fn is_all(&self) -> bool {
        self.0
            .iter()
            .any(|name| name.eq_ignore_ascii_case(ALL_JURISDICTIONS))
    }

    /// Case-insensitive membership test, honoring the "all" sentinel
    pub fn covers(&self, jurisdiction: &str) -> bool {
        let wanted = jurisdiction.trim().to_lowercase();
        self.is_all() || self.0.iter().any(|name| name.to_lowercase() == wanted)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// A government health scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub description: String,
    pub eligibility: String,
    pub coverage: String,
    #[serde(rename = "states")]
    pub jurisdictions: Jurisdictions,
    pub contact: SchemeContact,
}

impl Scheme {
    /// Text embedded for the vector index: name, description and eligibility
    pub fn matchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.eligibility)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    schemes: Vec<Scheme>,
}

/// Immutable, position-addressed catalog of schemes
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    schemes: Vec<Scheme>,
}

impl KnowledgeStore {
    pub fn new(schemes: Vec<Scheme>) -> Self {
        Self { schemes }
    }

    /// Catalog backed by the embedded dataset
    pub fn builtin() -> Self {
        Self::new(builtin_schemes())
    }

    /// Load a replacement catalog from a TOML file with a `[[schemes]]` array
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!(
            "Loaded {} schemes from {}",
            file.schemes.len(),
            path.display()
        );

        Ok(Self::new(file.schemes))
    }

    pub fn all_records(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn record_at(&self, index: usize) -> Result<&Scheme, CatalogError> {
        self.schemes.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.schemes.len(),
        })
    }

    /// Matchable text of every record, in catalog order
    pub fn matchable_texts(&self) -> Vec<String> {
        self.schemes.iter().map(Scheme::matchable_text).collect()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::builtin()
    }
}
