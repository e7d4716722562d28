//! CLI module for Review Forge
//!
//! - `serve`: HTTP API
//! - `generate`: one review from the terminal
//! - `compare`: the same review request against two models
//! - `categories`: list the categories known to the exemplar store

pub mod categories;
pub mod generate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Review Forge - grounded synthetic review generation
#[derive(Parser)]
#[command(name = "review-forge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; layered defaults, config/local and APP__* env vars otherwise
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Generate one review
    Generate(generate::GenerateArgs),

    /// Generate the same review with two models side by side
    Compare(generate::CompareArgs),

    /// List exemplar categories
    Categories,
}

/// Load configuration and install the logging subscriber
pub fn bootstrap(config_path: Option<&str>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = match config_path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    logging::init_logging(&config.logging)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "review-forge",
            "generate",
            "--theme",
            "вкусный кофе",
            "--rating",
            "5",
            "--category",
            "Кафе",
        ])
        .unwrap();

        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.review.theme, "вкусный кофе");
                assert_eq!(args.review.rating, 5);
                assert!(args.review.model.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_compare_with_global_config() {
        let cli = Cli::try_parse_from([
            "review-forge",
            "compare",
            "--theme",
            "кофе",
            "--rating",
            "4",
            "--category",
            "Кафе",
            "--second-model",
            "openai/gpt-4-turbo",
            "--config",
            "config/test.toml",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("config/test.toml"));
        assert!(matches!(cli.command, Command::Compare(ref a) if a.second_model == "openai/gpt-4-turbo"));
    }
}
