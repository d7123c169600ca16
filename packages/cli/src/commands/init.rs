use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

const SAMPLE_DOCUMENT: &str = r##"{
  "id": 1,
  "slug": "home",
  "name": "Home",
  "meta": { "title": "Welcome" },
  "containerStyle": { "padding": "24px", "backgroundColor": "#f5f5f5" },
  "blocks": [
    {
      "id": 1,
      "type": "Text",
      "data": { "value": "Hello from Pagecraft" },
      "style": { "fontSize": "24px", "textAlign": "center" }
    },
    {
      "id": 2,
      "type": "Button",
      "data": { "text": "Get started", "link": "https://example.com" },
      "style": { "backgroundColor": "#3366ff", "color": "#ffffff", "padding": "12px 24px" },
      "containerStyle": { "align": "center" }
    }
  ]
}
"##;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Output directory written to the config
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft project...".bright_blue().bold());

    let sample_path = cwd.join("page.json");
    if !sample_path.exists() {
        fs::write(&sample_path, SAMPLE_DOCUMENT)?;
        println!("  {} Created page.json", "✓".green());
    }

    let config = Config {
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit page.json");
    println!("  2. Run: pagecraft render page.json --target email");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}
