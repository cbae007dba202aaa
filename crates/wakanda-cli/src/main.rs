//! Wakanda CLI - Command-line interface
//!
//! Usage:
//!   wakanda ask --character <name> <question>
//!   wakanda lore

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wakanda_chain::{LoreLibrary, QuestionAnswerDocsChain};
use wakanda_core::{AnswerChain, AppConfig, CharacterQuery};

#[derive(Parser)]
#[command(name = "wakanda")]
#[command(about = "Ask Wakanda characters questions from the command line")]
#[command(version)]
struct Cli {
    /// TOML config file (environment variables still take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a character a question
    Ask {
        /// Character to answer as
        #[arg(short, long)]
        character: String,
        /// Question to ask
        question: String,
    },
    /// Show the lore context that would be sent to the model
    Lore,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Ask {
            character,
            question,
        } => {
            let query = CharacterQuery::new(character, question)
                .context("Character and question are required.")?;
            let chain = QuestionAnswerDocsChain::from_config(&config)?;
            let answer = chain.run(query.character(), query.question()).await?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        Commands::Lore => {
            let lore = match &config.chain.lore_dir {
                Some(dir) => LoreLibrary::load_dir(dir)?,
                None => LoreLibrary::empty(),
            };
            println!(
                "{} document(s), context limit {} chars",
                lore.len(),
                config.chain.max_context_length
            );
            print!("{}", lore.context(config.chain.max_context_length));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "wakanda",
            "ask",
            "--character",
            "Shuri",
            "What are you building?",
        ])
        .unwrap();

        match cli.command {
            Commands::Ask {
                character,
                question,
            } => {
                assert_eq!(character, "Shuri");
                assert_eq!(question, "What are you building?");
            }
            Commands::Lore => panic!("expected ask"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_ask_requires_character() {
        assert!(Cli::try_parse_from(["wakanda", "ask", "Who are you?"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["wakanda", "lore", "--config", "wakanda.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("wakanda.toml")));
    }
}
