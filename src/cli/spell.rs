//! `keyvox spell` - play a word back key by key.

use anyhow::{Context, Result};
use clap::Args;

use crate::audio::AudioBackend;
use crate::config::Config;
use crate::keyboard::Keyboard;
use crate::speller;

/// Arguments for the `spell` command.
#[derive(Args, Debug)]
pub struct SpellArgs {
    /// Text to spell out
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Language to spell in (defaults to the configured default)
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Spells the text, one highlighted and pronounced key at a time.
pub async fn run(args: &SpellArgs, config: &Config, backend: impl AudioBackend) -> Result<()> {
    let mut config = config.clone();
    if let Some(lang) = &args.lang {
        config.behavior.default_lang = lang.clone();
    }

    let keyboard = Keyboard::new(&config, backend)
        .await
        .context("Failed to start keyboard session")?;

    let planned = speller::spell_queue(&keyboard.layout(), &args.text).len();
    let skipped = args.text.chars().count() - planned;

    keyboard.spell(&args.text).await?;

    println!("spelled \"{}\" ({} keys)", args.text, planned);
    if skipped > 0 {
        println!("{} character(s) had no key in this layout and were skipped", skipped);
    }
    Ok(())
}
