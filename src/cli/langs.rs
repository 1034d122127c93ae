//! `keyvox langs` - list the supported languages.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::registry::LayoutRegistry;

/// Arguments for the `langs` command.
#[derive(Args, Debug)]
pub struct LangsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LangInfo {
    code: String,
    name: String,
    keys: usize,
}

/// Lists every language the keyboard ships a layout for.
pub async fn run(args: &LangsArgs) -> Result<()> {
    let registry = LayoutRegistry::new();
    let mut langs = Vec::new();
    for code in LayoutRegistry::languages() {
        let layout = registry.get(code).await?;
        langs.push(LangInfo {
            code: (*code).to_string(),
            name: layout.name.clone(),
            keys: layout.key_count(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&langs)?);
    } else {
        for lang in &langs {
            println!("{}  {} ({} keys)", lang.code, lang.name, lang.keys);
        }
    }
    Ok(())
}
