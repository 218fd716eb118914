use lumen::catalog::{supported_states, KnowledgeStore};
use lumen::cli::{Cli, Commands, ConfigAction};
use lumen::config::Config;
use lumen::emergency::EmergencyGuides;
use lumen::error::{LumenError, Result};
use lumen::retrieval::MatchSource;
use lumen::triage::TriageClassifier;
use lumen::ServiceContext;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Schemes {
            query,
            state,
            language,
            json,
        } => {
            cmd_schemes(cli.config, &query, state.as_deref(), &language, json)?;
        }
        Commands::Triage { text } => {
            cmd_triage(cli.config, &text)?;
        }
        Commands::Symptoms {
            message,
            language,
            context,
        } => {
            cmd_symptoms(cli.config, &message, &language, context.as_deref())?;
        }
        Commands::Emergency { kind, language } => {
            cmd_emergency(&kind, &language)?;
        }
        Commands::States => {
            for state in supported_states() {
                println!("{}", state);
            }
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "lumen=debug" } else { "lumen=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| LumenError::Io {
        source: e,
        context: "Failed to create tokio runtime".to_string(),
    })
}

fn cmd_schemes(
    config_path: Option<std::path::PathBuf>,
    query: &str,
    state: Option<&str>,
    language: &str,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let context = ServiceContext::from_config(config)?;

    let response = runtime()?.block_on(context.search_schemes(query, language, state));

    if json {
        let output = match &response {
            Ok(found) => serde_json::to_string_pretty(found),
            Err(failed) => serde_json::to_string_pretty(failed),
        }
        .map_err(|e| LumenError::Json {
            source: e,
            context: "Failed to serialize search response".to_string(),
        })?;
        println!("{}", output);
        return Ok(());
    }

    let response = match response {
        Ok(response) => response,
        Err(failed) => return Err(anyhow::anyhow!(failed.error).into()),
    };

    if response.results.is_empty() {
        println!("No matching schemes found");
        return Ok(());
    }

    for (rank, result) in response.results.iter().enumerate() {
        let scheme = &result.scheme;
        match result.source {
            MatchSource::Vector => println!(
                "{}. {} (relevance {:.2})",
                rank + 1,
                scheme.name,
                result.relevance_score
            ),
            MatchSource::Lexical => println!("{}. {}", rank + 1, scheme.name),
        }
        println!("   {}", scheme.description);
        println!("   Eligibility: {}", scheme.eligibility);
        println!("   Coverage: {}", scheme.coverage);
        println!(
            "   Helpline: {}  Website: {}",
            scheme.contact.helpline, scheme.contact.website
        );
    }

    Ok(())
}

fn cmd_triage(config_path: Option<std::path::PathBuf>, text: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let classifier = TriageClassifier::new(&config.triage);
    println!("{}", classifier.classify(text));
    Ok(())
}

fn cmd_symptoms(
    config_path: Option<std::path::PathBuf>,
    message: &str,
    language: &str,
    context: Option<&str>,
) -> Result<()> {
    let config = load_config(config_path)?;
    // Symptom guidance never touches the scheme index, so skip loading the model
    let service = ServiceContext::new(config, KnowledgeStore::builtin(), None, None);

    let response = runtime()?.block_on(service.process_symptoms(message, language, context));

    let json = serde_json::to_string_pretty(&response).map_err(|e| LumenError::Json {
        source: e,
        context: "Failed to serialize symptom response".to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn cmd_emergency(kind: &str, language: &str) -> Result<()> {
    let guides = EmergencyGuides::builtin();

    let guide = match guides.guide(kind, language) {
        Ok(guide) => guide,
        Err(e) => {
            println!("{}", e);
            println!(
                "Available guides: {}",
                EmergencyGuides::supported_types().join(", ")
            );
            return Ok(());
        }
    };

    if guide.call_emergency {
        println!("⚠ Call emergency services (108) now");
    }
    println!("Steps:");
    for (i, step) in guide.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!("Do not:");
    for item in &guide.do_not {
        println!("  - {}", item);
    }
    Ok(())
}

fn cmd_config(config_path: Option<std::path::PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| LumenError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<std::path::PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    Config::load_or_default(&path)
}
