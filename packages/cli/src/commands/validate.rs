use super::read_document;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Editor;
use pagecraft_model::PageDocument;
use pagecraft_renderer::Registry;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Page document JSON files to check
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,

    /// List every valid document, not only failures
    #[arg(short, long)]
    pub list: bool,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    println!("🔍 {} page documents", "Checking".green().bold());
    println!();

    let mut total_blocks = 0;
    let mut total_errors = 0;

    for path in &args.documents {
        match read_document(path).and_then(|document| check_document(document, &config)) {
            Ok(blocks) => {
                total_blocks += blocks;
                if args.list {
                    println!("{} {} ({} blocks)", "✓".green(), path.display(), blocks);
                }
            }
            Err(e) => {
                total_errors += 1;
                eprintln!("{} {}", "✗".red(), path.display());
                eprintln!("  {} {:#}", "error".red().bold(), e);
            }
        }
    }

    println!();
    println!("   Documents checked: {}", args.documents.len());
    println!("   Blocks checked: {}", total_blocks);

    if total_errors > 0 {
        return Err(anyhow!("{} invalid documents", total_errors));
    }

    println!("   {} No issues found!", "✓".green());
    Ok(())
}

/// Load the document into a session and render every block to each target.
/// Returns the number of blocks checked.
pub fn check_document(document: PageDocument, config: &Config) -> Result<usize> {
    let page_id = document.page.id;
    let mut editor = Editor::new(&config.history);
    editor.hydrate(document)?;

    let registry = Registry::new(config.render.clone())?;
    let blocks = editor.store().page_blocks(page_id);
    for block in &blocks {
        registry.render_to_interactive(block)?;
        registry.render_to_markup(block)?;
        registry.render_to_email_markup(block)?;
    }

    Ok(blocks.len())
}
