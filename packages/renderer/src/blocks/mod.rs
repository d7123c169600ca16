//! Per-variant renderers and the wrappers they share.
//!
//! Every renderer builds its content element once and places it either in
//! the flex container (interactive and markup targets) or in the nested
//! table container (email target). Both containers take their width from
//! [`compose_container`], so margin math never differs between targets.

mod button;
mod image;
mod text;

pub use button::ButtonRenderer;
pub use image::ImageRenderer;
pub use text::TextRenderer;

use crate::options::RenderOptions;
use crate::vnode::VNode;
use pagecraft_model::{Block, BlockType};
use pagecraft_style::{compose_container, email_align, CssProperties};

/// The three output forms of a block
pub trait BlockRenderer {
    fn block_type(&self) -> BlockType;

    /// UI tree bound to the live document by block id keys and field bindings
    fn render_to_interactive(&self) -> VNode;

    /// Standalone, fully styled HTML fragment
    fn render_to_markup(&self) -> String;

    /// Nested-table HTML fragment for email clients
    fn render_to_email_markup(&self) -> String;
}

pub(crate) fn block_class(block_type: BlockType) -> String {
    format!(
        "pagecraft-block pagecraft-block-{}",
        block_type.as_ref().to_ascii_lowercase()
    )
}

/// Flex wrapper used by the markup target
pub(crate) fn container(block: &Block, options: &RenderOptions) -> VNode {
    VNode::element("div")
        .with_attr("class", block_class(block.block_type()))
        .with_styles(compose_container(
            block.container_style(),
            &options.parent_width,
        ))
}

/// Flex wrapper keyed to the block for the interactive target
pub(crate) fn interactive_container(block: &Block, options: &RenderOptions) -> VNode {
    let mut node = container(block, options).with_attr("data-block-type", block.block_type().as_ref());

    if let Some(id) = block.id() {
        node = node
            .with_key(id.to_string())
            .with_attr("data-block-id", id.to_string());
    }

    node
}

/// Presentation table wrapping `content` for email clients.
///
/// Flexbox is not available there, so the container's alignment becomes the
/// cell's `align` attribute and the background color is mirrored to
/// `bgcolor`.
pub(crate) fn email_container(block: &Block, options: &RenderOptions, content: VNode) -> VNode {
    let style = block.container_style();
    let composed = compose_container(style, &options.parent_width);

    let mut table_styles = CssProperties::new();
    table_styles.set_opt("width", composed.get("width"));
    table_styles.set_opt("margin", style.margin.as_deref());

    let mut cell_styles = CssProperties::new();
    for name in [
        "padding",
        "backgroundColor",
        "backgroundImage",
        "backgroundSize",
        "backgroundPosition",
        "border",
        "borderRadius",
    ] {
        cell_styles.set_opt(name, composed.get(name));
    }

    let mut cell = VNode::element("td");
    if let Some(align) = style.align {
        cell = cell.with_attr("align", email_align(align));
        cell_styles.set("textAlign", email_align(align));
    }
    if let Some(color) = style.background_color.as_deref() {
        cell = cell.with_attr("bgcolor", color);
    }

    presentation_table()
        .with_attr("class", block_class(block.block_type()))
        .with_styles(table_styles)
        .with_child(VNode::element("tr").with_child(cell.with_styles(cell_styles).with_child(content)))
}

pub(crate) fn presentation_table() -> VNode {
    VNode::element("table")
        .with_attr("role", "presentation")
        .with_attr("width", "100%")
        .with_attr("cellpadding", "0")
        .with_attr("cellspacing", "0")
        .with_attr("border", "0")
}
