//! Keyvox - multilingual talking keyboard
//!
//! This binary provides headless access to the keyboard core: listing
//! languages, printing layouts, pronouncing single keys, and spelling words.
//! The rendering frontend is a separate embedding; everything here goes
//! through the same session API it would use.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyvox::audio::DefaultBackend;
use keyvox::cli;
use keyvox::config::Config;

/// Keyvox - multilingual talking keyboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Resolve assets and highlight keys without playing any sound
    #[arg(long, global = true)]
    no_audio: bool,

    /// Override the audio asset root directory
    #[arg(long, value_name = "PATH", global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported languages
    Langs(cli::LangsArgs),
    /// Print a language's layout
    Show(cli::ShowArgs),
    /// Pronounce a single key
    Play(cli::PlayArgs),
    /// Spell a word key by key
    Spell(cli::SpellArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load or create configuration, then apply CLI overrides
    let mut config = Config::load().unwrap_or_default();
    if let Some(assets) = args.assets {
        config.assets.root = assets;
    }

    match args.command {
        Command::Langs(cmd) => cli::langs::run(&cmd).await,
        Command::Show(cmd) => cli::show::run(&cmd, &config).await,
        Command::Play(cmd) => {
            cli::play::run(&cmd, &config, DefaultBackend::select(args.no_audio)).await
        }
        Command::Spell(cmd) => {
            cli::spell::run(&cmd, &config, DefaultBackend::select(args.no_audio)).await
        }
    }
}
