//! `keyvox show` - print a language's layout as the renderer would see it.

use anyhow::{Context, Result};
use clap::Args;

use crate::audio::SilentBackend;
use crate::config::Config;
use crate::keyboard::Keyboard;

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Language to show (defaults to the configured default language)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Render with shift held
    #[arg(long)]
    pub shift: bool,

    /// Output the per-key view models as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prints the layout's view models, row by row.
pub async fn run(args: &ShowArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if let Some(lang) = &args.lang {
        config.behavior.default_lang = lang.clone();
    }

    let keyboard = Keyboard::new(&config, SilentBackend)
        .await
        .context("Failed to start keyboard session")?;
    if args.shift {
        keyboard.toggle_shift();
    }

    let view = keyboard.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} layout:", keyboard.layout().name);
    for row in &view {
        let rendered: Vec<String> = row
            .iter()
            .map(|key| {
                if key.shifted_label.is_empty() {
                    format!("[{}]", key.main_label)
                } else {
                    format!("[{} {}]", key.main_label, key.shifted_label)
                }
            })
            .collect();
        println!("{}", rendered.join(" "));
    }
    Ok(())
}
