//! # Pagecraft Renderer
//!
//! Turns typed blocks into their three output forms:
//!
//! - an interactive [`VNode`] tree for the editing UI, keyed by block id with
//!   field bindings on the editable elements
//! - a standalone, fully styled HTML fragment for the published page
//! - a nested-table HTML fragment for email clients
//!
//! Renderers are resolved through a [`Registry`] keyed by block type. The
//! default registry checks at construction that every block type has one.
//!
//! ```rust,ignore
//! let registry = Registry::new(RenderOptions::default())?;
//! let html = registry.render_to_markup(&Block::text("Hello"))?;
//! let page = render_page_email(&registry, &page, store.page_blocks(page.id))?;
//! ```

pub mod blocks;
pub mod error;
pub mod html;
pub mod options;
pub mod page;
pub mod registry;
pub mod vnode;

pub use blocks::{BlockRenderer, ButtonRenderer, ImageRenderer, TextRenderer};
pub use error::{RenderError, RenderResult};
pub use html::{escape_html, sanitize_url, to_html};
pub use options::RenderOptions;
pub use page::{render_document, render_page_email, render_page_interactive, render_page_markup};
pub use registry::{Registry, RendererFactory};
pub use vnode::{text_lines, FieldBinding, VNode};
