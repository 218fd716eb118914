//! Lumen - healthcare assistant core
//!
//! Matches free-text queries against a catalog of government health schemes
//! using semantic vector search, degrading to substring matching when no
//! embedding model is available, and assigns triage levels to symptom text.

pub mod assistant;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod embedding;
pub mod emergency;
pub mod error;
pub mod retrieval;
pub mod triage;

pub use context::ServiceContext;
pub use error::{LumenError, Result};
