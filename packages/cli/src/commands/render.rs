use super::read_document;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagecraft_editor::Editor;
use pagecraft_model::PageDocument;
use pagecraft_renderer::{
    render_document, render_page_email, render_page_interactive, render_page_markup, Registry,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Styled HTML fragment for the published page
    Markup,
    /// Nested-table HTML for email clients
    Email,
    /// Editor VNode tree as JSON
    Interactive,
    /// Standalone HTML document
    Document,
}

impl Target {
    fn extension(self) -> &'static str {
        match self {
            Target::Markup => "fragment.html",
            Target::Email => "email.html",
            Target::Interactive => "vnode.json",
            Target::Document => "html",
        }
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page document JSON files
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Target::Document)]
    pub target: Target,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Pretty print markup (overrides config)
    #[arg(long)]
    pub pretty: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let mut config = Config::load(cwd)?;
    if args.pretty {
        config.render.pretty = true;
    }

    if !args.stdout {
        println!("{}", "🔨 Rendering page documents...".bright_blue().bold());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for path in &args.documents {
        match render_file(path, &args, &config, cwd) {
            Ok(output_path) => {
                success_count += 1;
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), path.display(), output_path);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    if error_count > 0 {
        return Err(anyhow!(
            "rendered {} documents, {} failed",
            success_count,
            error_count
        ));
    }

    if !args.stdout {
        println!();
        println!("{} Rendered {} documents", "✅".green(), success_count);
    }

    Ok(())
}

fn render_file(path: &Path, args: &RenderArgs, config: &Config, cwd: &Path) -> Result<String> {
    let document = read_document(path)?;
    let output = render_page_document(document, args.target, config)?;

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("cannot name output for {}", path.display()))?;
    let out_dir = config.get_out_dir(cwd, args.out_dir.as_deref());
    let output_file = out_dir.join(format!("{}.{}", stem, args.target.extension()));

    fs::create_dir_all(&out_dir)?;
    fs::write(&output_file, output)?;

    Ok(output_file.display().to_string())
}

/// Load a document into an editor session and render its page
pub fn render_page_document(document: PageDocument, target: Target, config: &Config) -> Result<String> {
    let page_id = document.page.id;
    let mut editor = Editor::new(&config.history);
    editor.hydrate(document)?;

    let store = editor.store();
    let page = store
        .page(page_id)
        .ok_or_else(|| anyhow!("page {} was not loaded", page_id))?;
    let blocks = store.page_blocks(page_id);
    debug!(page = %page_id, blocks = blocks.len(), ?target, "rendering page");

    let registry = Registry::new(config.render.clone())?;
    let output = match target {
        Target::Markup => render_page_markup(&registry, page, blocks)?,
        Target::Email => render_page_email(&registry, page, blocks)?,
        Target::Interactive => {
            serde_json::to_string_pretty(&render_page_interactive(&registry, page, blocks)?)?
        }
        Target::Document => render_document(&registry, page, blocks)?,
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"{
        "id": 3,
        "name": "Launch",
        "meta": { "title": "We launched" },
        "blocks": [
            { "id": 1, "type": "Text", "data": { "value": "Big news" }, "style": { "textAlign": "center" } },
            { "id": 2, "type": "Button", "data": { "text": "Read more", "link": "/news" } }
        ]
    }"#;

    fn render_target(target: Target) -> String {
        let document = PageDocument::from_json(SOURCE).unwrap();
        render_page_document(document, target, &Config::default()).unwrap()
    }

    #[test]
    fn test_render_markup() {
        let html = render_target(Target::Markup);
        assert!(html.starts_with("<div class=\"pagecraft-page\""));
        assert!(html.contains("Big news"));
        assert!(html.find("Big news") < html.find("Read more"));
    }

    #[test]
    fn test_render_email() {
        let html = render_target(Target::Email);
        assert!(html.starts_with("<table"));
        assert!(html.contains("width=\"600\""));
        assert!(html.contains("href=\"/news\""));
    }

    #[test]
    fn test_render_interactive() {
        let json = render_target(Target::Interactive);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(json.contains("\"page-3\""));
        assert!(value.is_object());
    }

    #[test]
    fn test_render_document() {
        let html = render_target(Target::Document);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>We launched</title>"));
    }

    #[test]
    fn test_duplicate_block_ids_are_rejected() {
        let source = r#"{
            "id": 1,
            "blocks": [
                { "id": 1, "type": "Text", "data": { "value": "a" } },
                { "id": 1, "type": "Text", "data": { "value": "b" } }
            ]
        }"#;
        let document = PageDocument::from_json(source).unwrap();
        assert!(render_page_document(document, Target::Markup, &Config::default()).is_err());
    }
}
