//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "Healthcare assistant: government scheme search and symptom triage",
    long_about = "Lumen matches free-text questions against a catalog of government health schemes, \
                  using semantic search when an embedding model is available and substring matching \
                  otherwise, and assigns Green/Yellow/Red triage levels to symptom descriptions."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/lumen/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search government health schemes
    Schemes {
        /// Search query text
        query: String,

        /// Restrict results to schemes available in this state
        #[arg(short, long)]
        state: Option<String>,

        /// Language tag echoed in the response
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Classify symptom text as Green, Yellow or Red
    Triage {
        /// Symptom description
        text: String,
    },

    /// Get triage guidance for a symptom description
    Symptoms {
        /// Symptom description
        message: String,

        /// Response language tag
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Additional context (age, history, duration)
        #[arg(long)]
        context: Option<String>,
    },

    /// Show a first-aid guide
    Emergency {
        /// Emergency type (e.g. snakebite, burns)
        kind: String,

        /// Guide language tag
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// List supported states
    States,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_schemes() {
        let cli = Cli::parse_from(["lumen", "schemes", "insurance", "--state", "Goa", "--json"]);
        match cli.command {
            Commands::Schemes {
                query, state, json, ..
            } => {
                assert_eq!(query, "insurance");
                assert_eq!(state.as_deref(), Some("Goa"));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
