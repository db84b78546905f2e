//! Saathi CLI entry point.
//!
//! Binary name: `saathi`
//!
//! Parses CLI arguments, reads deployment configuration from the
//! environment, signs in when credentials are supplied, then dispatches to
//! the chat loop or one of the listing/session commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use saathi_types::backend::Language;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,saathi=debug",
        _ => "trace",
    };
    saathi_observe::tracing_setup::init_tracing(filter).map_err(|e| anyhow::anyhow!(e))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "saathi", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { language } => {
            let language: Language = language.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            cli::chat::run_chat_loop(&state, language).await?;
        }
        Commands::Sessions => {
            cli::sessions::list_sessions(&state, cli.json).await?;
        }
        Commands::Listing {
            description,
            category,
            image,
        } => {
            cli::listing::generate(&state, &description, &category, &image, cli.json).await?;
        }
        Commands::Translate {
            title,
            description,
            language,
        } => {
            cli::listing::translate(&state, title, description, language, cli.json).await?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
