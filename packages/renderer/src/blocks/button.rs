use super::{container, email_container, interactive_container, presentation_table, BlockRenderer};
use crate::error::{RenderError, RenderResult};
use crate::html::{sanitize_url, to_html};
use crate::options::RenderOptions;
use crate::vnode::VNode;
use pagecraft_model::{Block, BlockType, ButtonBlock};
use pagecraft_style::CssProperties;

/// Renders a button as a styled anchor.
///
/// The anchor is placed by `style.textAlign` inside a full-width wrapper, so
/// the button's own alignment never depends on `containerStyle.align`.
pub struct ButtonRenderer<'a> {
    block: &'a Block,
    record: &'a ButtonBlock,
    options: &'a RenderOptions,
}

impl<'a> ButtonRenderer<'a> {
    pub fn new(block: &'a Block, options: &'a RenderOptions) -> RenderResult<Self> {
        match block {
            Block::Button(record) => Ok(Self {
                block,
                record,
                options,
            }),
            other => Err(RenderError::TypeMismatch {
                expected: BlockType::Button,
                found: other.block_type(),
            }),
        }
    }

    fn anchor(&self) -> VNode {
        let mut styles = CssProperties::new()
            .with("display", "inline-block")
            .with("textDecoration", "none")
            .with("textAlign", "center");

        let mut declared = CssProperties::from_serializable(&self.record.style);
        // Both belong to the wrapper
        declared.remove("width");
        declared.remove("textAlign");
        styles.extend(declared);

        let mut anchor = VNode::element("a").with_styles(styles);
        if let Some(link) = self.record.data.link.as_deref() {
            anchor = anchor.with_attr("href", sanitize_url(link));
        }

        anchor.with_child(VNode::text(self.record.data.text.as_str()))
    }

    fn wrapper(&self) -> VNode {
        let style = &self.record.style;
        VNode::element("div")
            .with_style("textAlign", button_align(style.text_align.as_deref()))
            .with_style("width", style.width.as_deref().unwrap_or("100%"))
    }
}

/// Normalized `text-align` of the button wrapper
fn button_align(text_align: Option<&str>) -> &'static str {
    match text_align.map(str::trim) {
        Some("center") => "center",
        Some("right") | Some("end") => "right",
        _ => "left",
    }
}

impl BlockRenderer for ButtonRenderer<'_> {
    fn block_type(&self) -> BlockType {
        BlockType::Button
    }

    fn render_to_interactive(&self) -> VNode {
        let anchor = self.anchor().with_binding(self.record.id, "data.text");
        interactive_container(self.block, self.options)
            .with_child(self.wrapper().with_child(anchor))
    }

    fn render_to_markup(&self) -> String {
        to_html(
            &container(self.block, self.options).with_child(self.wrapper().with_child(self.anchor())),
            self.options,
        )
    }

    fn render_to_email_markup(&self) -> String {
        let align = button_align(self.record.style.text_align.as_deref());
        let cell = VNode::element("td")
            .with_attr("align", align)
            .with_style("textAlign", align)
            .with_child(self.anchor());

        let mut table = presentation_table().with_child(VNode::element("tr").with_child(cell));
        if let Some(width) = self.record.style.width.as_deref() {
            table = table.with_style("width", width);
        }

        to_html(&email_container(self.block, self.options, table), self.options)
    }
}
