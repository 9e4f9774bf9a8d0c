//! SupportDesk CLI — the main entry point.
//!
//! Commands:
//! - `console`    — Interactive operator console
//! - `match`      — Rank knowledge articles against a piece of text
//! - `compose`    — Compose the reply the assistant would send
//! - `suggest`    — Suggestion panel for the seed transcript
//! - `transcript` — Print the seed transcript
//! - `status`     — Show configuration summary
//! - `config`     — Show, locate, or validate the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "supportdesk",
    about = "SupportDesk — support agent console with an assisting reply composer",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.supportdesk/config.toml
    #[arg(short, long, global = true, env = "SUPPORTDESK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive operator console
    Console,

    /// Rank knowledge articles against some text
    Match {
        /// Text to match (joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Compose the assistant's reply to some text
    Compose {
        /// Text to reply to (joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show the suggestion panel for the seed transcript
    Suggest,

    /// Print the seed transcript
    Transcript {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show configuration summary
    Status,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Validate the config file
    Validate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Console => commands::console::run(config_path).await?,
        Commands::Match { text } => commands::inspect::run_match(config_path, &text.join(" "))?,
        Commands::Compose { text } => {
            commands::inspect::run_compose(config_path, &text.join(" "))?
        }
        Commands::Suggest => commands::inspect::run_suggest(config_path).await?,
        Commands::Transcript { json } => commands::transcript::run(config_path, json)?,
        Commands::Status => commands::status::run(config_path)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path),
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
        },
    }

    Ok(())
}
