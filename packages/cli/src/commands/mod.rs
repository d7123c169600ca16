pub mod init;
pub mod render;
pub mod validate;

pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use pagecraft_model::PageDocument;
use std::fs;
use std::path::Path;

/// Read and parse a page document file
pub(crate) fn read_document(path: &Path) -> Result<PageDocument> {
    let source =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    PageDocument::from_json(&source).with_context(|| format!("invalid document {}", path.display()))
}
