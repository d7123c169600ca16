use super::{container, email_container, interactive_container, BlockRenderer};
use crate::error::{RenderError, RenderResult};
use crate::html::to_html;
use crate::options::RenderOptions;
use crate::vnode::{text_lines, VNode};
use pagecraft_model::{Block, BlockType, TextBlock};
use pagecraft_style::CssProperties;

pub struct TextRenderer<'a> {
    block: &'a Block,
    record: &'a TextBlock,
    options: &'a RenderOptions,
}

impl<'a> TextRenderer<'a> {
    pub fn new(block: &'a Block, options: &'a RenderOptions) -> RenderResult<Self> {
        match block {
            Block::Text(record) => Ok(Self {
                block,
                record,
                options,
            }),
            other => Err(RenderError::TypeMismatch {
                expected: BlockType::Text,
                found: other.block_type(),
            }),
        }
    }

    fn paragraph(&self) -> VNode {
        let mut styles = CssProperties::new().with("margin", "0");
        styles.extend(CssProperties::from_serializable(&self.record.style));
        // Long words must wrap inside the container on every target
        styles.set("wordBreak", "break-word");

        VNode::element("p")
            .with_styles(styles)
            .with_children(text_lines(&self.record.data.value))
    }
}

impl BlockRenderer for TextRenderer<'_> {
    fn block_type(&self) -> BlockType {
        BlockType::Text
    }

    fn render_to_interactive(&self) -> VNode {
        interactive_container(self.block, self.options)
            .with_child(self.paragraph().with_binding(self.record.id, "data.value"))
    }

    fn render_to_markup(&self) -> String {
        to_html(
            &container(self.block, self.options).with_child(self.paragraph()),
            self.options,
        )
    }

    fn render_to_email_markup(&self) -> String {
        to_html(
            &email_container(self.block, self.options, self.paragraph()),
            self.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ContainerStyle, TextStyle};
    use pretty_assertions::assert_eq;

    fn styled_text() -> Block {
        let mut block = Block::text("Hello").with_id(1u64);
        if let Block::Text(record) = &mut block {
            record.style = TextStyle {
                font_size: Some("18px".to_string()),
                ..Default::default()
            };
        }
        block
    }

    #[test]
    fn test_markup() {
        let block = styled_text();
        let options = RenderOptions::default();
        let html = TextRenderer::new(&block, &options).unwrap().render_to_markup();

        assert_eq!(
            html,
            "<div class=\"pagecraft-block pagecraft-block-text\" style=\"width: 100%; display: flex; flex-direction: column; box-sizing: border-box;\">\
             <p style=\"margin: 0; font-size: 18px; word-break: break-word;\">Hello</p></div>"
        );
    }

    #[test]
    fn test_word_break_is_always_last() {
        let block = styled_text();
        let options = RenderOptions::default();
        let renderer = TextRenderer::new(&block, &options).unwrap();
        let css = match renderer.paragraph() {
            VNode::Element { styles, .. } => styles.to_css_string(),
            VNode::Text { .. } => unreachable!(),
        };

        assert!(css.ends_with("word-break: break-word;"));
    }

    #[test]
    fn test_interactive_binds_value() {
        let block = styled_text();
        let options = RenderOptions::default();
        let node = TextRenderer::new(&block, &options)
            .unwrap()
            .render_to_interactive();

        let paragraph = node.find_tag("p").unwrap();
        let binding = paragraph.binding().unwrap();
        assert_eq!(binding.field, "data.value");
        assert_eq!(binding.block_id, block.id());
        assert_eq!(node.key(), Some("1"));
    }

    #[test]
    fn test_value_is_escaped_and_breaks_lines() {
        let block = Block::text("a < b\nc & d");
        let options = RenderOptions::default();
        let html = TextRenderer::new(&block, &options).unwrap().render_to_markup();

        assert!(html.contains(">a &lt; b<br />c &amp; d</p>"));
    }

    #[test]
    fn test_margin_reduces_width() {
        let block = Block::text("Hi").with_container_style(ContainerStyle {
            margin: Some("0px 10px 0px 10px".to_string()),
            ..Default::default()
        });
        let options = RenderOptions::default();
        let renderer = TextRenderer::new(&block, &options).unwrap();

        assert!(renderer.render_to_markup().contains("width: calc(100% - 20px);"));
        assert!(renderer
            .render_to_email_markup()
            .contains("width: calc(100% - 20px);"));
    }

    #[test]
    fn test_rejects_other_variants() {
        let block = Block::image("a.png");
        let options = RenderOptions::default();
        assert!(matches!(
            TextRenderer::new(&block, &options),
            Err(RenderError::TypeMismatch {
                expected: BlockType::Text,
                found: BlockType::Image
            })
        ));
    }
}
