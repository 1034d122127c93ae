//! `keyvox play` - resolve one physical key and pronounce it.

use anyhow::{Context, Result};
use clap::Args;

use crate::audio::AudioBackend;
use crate::config::Config;
use crate::keyboard::Keyboard;

/// Arguments for the `play` command.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Physical key code to play (e.g. "KeyQ", "Digit1")
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Language to resolve against (defaults to the configured default)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Play the shifted variant
    #[arg(long)]
    pub shift: bool,
}

/// Pronounces one key and reports what was resolved.
pub async fn run(args: &PlayArgs, config: &Config, backend: impl AudioBackend) -> Result<()> {
    let mut config = config.clone();
    if let Some(lang) = &args.lang {
        config.behavior.default_lang = lang.clone();
    }

    let keyboard = Keyboard::new(&config, backend)
        .await
        .context("Failed to start keyboard session")?;
    keyboard.set_shift(args.shift);

    let Some(entry) = keyboard.press_key(&args.code).await else {
        anyhow::bail!(
            "no key '{}' in the '{}' layout",
            args.code,
            keyboard.current_language()
        );
    };

    let labels = entry.labels();
    println!(
        "{}: \"{}\" (spoken as \"{}\")",
        entry.code,
        labels.main,
        entry.audio_basename(keyboard.shift_active())
    );
    Ok(())
}
