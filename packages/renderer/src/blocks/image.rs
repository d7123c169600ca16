use super::{container, email_container, interactive_container, BlockRenderer};
use crate::error::{RenderError, RenderResult};
use crate::html::{sanitize_url, to_html};
use crate::options::RenderOptions;
use crate::vnode::VNode;
use pagecraft_model::{Block, BlockType, ImageBlock};
use pagecraft_style::{CssProperties, Length};

pub struct ImageRenderer<'a> {
    block: &'a Block,
    record: &'a ImageBlock,
    options: &'a RenderOptions,
}

impl<'a> ImageRenderer<'a> {
    pub fn new(block: &'a Block, options: &'a RenderOptions) -> RenderResult<Self> {
        match block {
            Block::Image(record) => Ok(Self {
                block,
                record,
                options,
            }),
            other => Err(RenderError::TypeMismatch {
                expected: BlockType::Image,
                found: other.block_type(),
            }),
        }
    }

    fn link(&self) -> Option<&str> {
        self.record
            .data
            .link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// The image element. A linked image fills its anchor.
    fn image(&self, email: bool) -> VNode {
        let style = &self.record.style;
        let mut styles = CssProperties::from_serializable(style);
        styles.set("display", "block");
        if style.max_width.is_none() {
            styles.set("maxWidth", "100%");
        }
        if self.link().is_some() {
            styles.set("width", "100%");
        }

        let mut image = VNode::element("img")
            .with_attr("src", sanitize_url(&self.record.data.url))
            .with_attr("alt", self.record.data.alt.as_deref().unwrap_or(""));

        if email {
            image = image.with_attr("border", "0");
            // Outlook ignores CSS widths on images. A linked image takes the
            // anchor's width instead.
            if self.link().is_none() {
                if let Some(width) = pixel_width(style.width.as_deref()) {
                    image = image.with_attr("width", width);
                }
            }
        }

        image.with_styles(styles)
    }

    /// Wrap in an anchor carrying the declared width when the block links
    /// somewhere
    fn linked(&self, image: VNode) -> VNode {
        match self.link() {
            Some(link) => VNode::element("a")
                .with_attr("href", sanitize_url(link))
                .with_style("display", "block")
                .with_style(
                    "width",
                    self.record.style.width.as_deref().unwrap_or("100%"),
                )
                .with_child(image),
            None => image,
        }
    }
}

fn pixel_width(width: Option<&str>) -> Option<String> {
    let length = Length::parse(width?)?;
    if length.unit == "px" {
        Some(length.value.round().to_string())
    } else {
        None
    }
}

impl BlockRenderer for ImageRenderer<'_> {
    fn block_type(&self) -> BlockType {
        BlockType::Image
    }

    fn render_to_interactive(&self) -> VNode {
        let image = self.image(false).with_binding(self.record.id, "data.url");
        interactive_container(self.block, self.options).with_child(self.linked(image))
    }

    fn render_to_markup(&self) -> String {
        to_html(
            &container(self.block, self.options).with_child(self.linked(self.image(false))),
            self.options,
        )
    }

    fn render_to_email_markup(&self) -> String {
        to_html(
            &email_container(self.block, self.options, self.linked(self.image(true))),
            self.options,
        )
    }
}
