//! Whole-page rendering: a page's blocks, in order, inside the page container.

use crate::blocks::presentation_table;
use crate::error::RenderResult;
use crate::html::{sanitize_url, HtmlWriter};
use crate::registry::Registry;
use crate::vnode::VNode;
use pagecraft_model::{Block, Page};
use pagecraft_style::{compose_container, email_align, CssProperties, Length};

fn page_container(registry: &Registry, page: &Page) -> VNode {
    VNode::element("div")
        .with_attr("class", "pagecraft-page")
        .with_attr("data-page-id", page.id.to_string())
        .with_styles(compose_container(
            &page.container_style,
            &registry.options().parent_width,
        ))
}

/// Interactive tree for a page; blocks are keyed by id
pub fn render_page_interactive<'b>(
    registry: &Registry,
    page: &Page,
    blocks: impl IntoIterator<Item = &'b Block>,
) -> RenderResult<VNode> {
    let children = blocks
        .into_iter()
        .map(|block| registry.render_to_interactive(block))
        .collect::<RenderResult<Vec<_>>>()?;

    Ok(page_container(registry, page)
        .with_key(format!("page-{}", page.id))
        .with_children(children))
}

pub fn render_page_markup<'b>(
    registry: &Registry,
    page: &Page,
    blocks: impl IntoIterator<Item = &'b Block>,
) -> RenderResult<String> {
    let mut writer = HtmlWriter::new(registry.options());
    writer.begin(&page_container(registry, page));
    for block in blocks {
        writer.add_fragment(&registry.render_to_markup(block)?);
    }
    writer.end("div");
    Ok(writer.get_output())
}

/// Email body: a full-width background table centering a fixed-width
/// content table that holds the block tables
pub fn render_page_email<'b>(
    registry: &Registry,
    page: &Page,
    blocks: impl IntoIterator<Item = &'b Block>,
) -> RenderResult<String> {
    let options = registry.options();
    let style = &page.container_style;

    let mut outer = presentation_table().with_attr("class", "pagecraft-page");
    if let Some(color) = style.background_color.as_deref() {
        outer = outer
            .with_attr("bgcolor", color)
            .with_style("backgroundColor", color);
    }

    let mut content = presentation_table()
        .with_style("width", options.email_width.as_str())
        .with_style("maxWidth", "100%");
    if let Some(width) = Length::parse(&options.email_width).filter(|w| w.unit == "px") {
        content = content.with_attr("width", width.value.round().to_string());
    }

    let mut cell_styles = CssProperties::new();
    cell_styles.set_opt("padding", style.padding.as_deref());
    let align = style.align.map(email_align).unwrap_or("center");

    let mut writer = HtmlWriter::new(options);
    writer.begin(&outer);
    writer.begin(&VNode::element("tr"));
    writer.begin(&VNode::element("td").with_attr("align", align));
    writer.begin(&content);
    writer.begin(&VNode::element("tr"));
    writer.begin(&VNode::element("td").with_styles(cell_styles));
    for block in blocks {
        writer.add_fragment(&registry.render_to_email_markup(block)?);
    }
    for tag in ["td", "tr", "table", "td", "tr", "table"] {
        writer.end(tag);
    }
    Ok(writer.get_output())
}

/// Minimal standalone HTML document around the page markup
pub fn render_document<'b>(
    registry: &Registry,
    page: &Page,
    blocks: impl IntoIterator<Item = &'b Block>,
) -> RenderResult<String> {
    let body = render_page_markup(registry, page, blocks)?;
    let meta = &page.meta;
    let title = meta
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or(page.name.as_str());

    let mut writer = HtmlWriter::new(registry.options());
    writer.add_line("<!DOCTYPE html>");
    writer.begin(&VNode::element("html").with_attr("lang", meta.language.as_deref().unwrap_or("en")));
    writer.begin(&VNode::element("head"));
    writer.write_node(&VNode::element("meta").with_attr("charset", "utf-8"));
    writer.write_node(
        &VNode::element("meta")
            .with_attr("name", "viewport")
            .with_attr("content", "width=device-width, initial-scale=1"),
    );
    writer.write_node(&VNode::element("title").with_child(VNode::text(title)));
    if let Some(description) = meta.description.as_deref() {
        writer.write_node(
            &VNode::element("meta")
                .with_attr("name", "description")
                .with_attr("content", description),
        );
    }
    if let Some(favicon) = meta.favicon.as_deref() {
        writer.write_node(
            &VNode::element("link")
                .with_attr("rel", "icon")
                .with_attr("href", sanitize_url(favicon)),
        );
    }
    writer.end("head");
    writer.begin(&VNode::element("body").with_style("margin", "0"));
    writer.add_fragment(&body);
    writer.end("body");
    writer.end("html");

    Ok(writer.get_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use pagecraft_model::PageMeta;

    fn page() -> Page {
        let mut page = Page::new(1u64).with_name("Home");
        page.meta = PageMeta {
            title: Some("Welcome".to_string()),
            description: Some("A \"quoted\" page".to_string()),
            ..Default::default()
        };
        page
    }

    fn blocks() -> Vec<Block> {
        vec![
            Block::text("First").with_id(1u64),
            Block::button("Second", None).with_id(2u64),
        ]
    }

    #[test]
    fn test_markup_keeps_block_order() {
        let registry = Registry::new(RenderOptions::default()).unwrap();
        let html = render_page_markup(&registry, &page(), &blocks()).unwrap();

        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.starts_with("<div class=\"pagecraft-page\" data-page-id=\"1\""));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_interactive_page_children_are_keyed() {
        let registry = Registry::new(RenderOptions::default()).unwrap();
        let node = render_page_interactive(&registry, &page(), &blocks()).unwrap();

        let keys: Vec<_> = node.children().iter().map(VNode::key).collect();
        assert_eq!(keys, vec![Some("1"), Some("2")]);
        assert_eq!(node.key(), Some("page-1"));
    }

    #[test]
    fn test_email_page_wraps_in_content_table() {
        let registry = Registry::new(RenderOptions::default()).unwrap();
        let html = render_page_email(&registry, &page(), &blocks()).unwrap();

        assert!(html.contains("width=\"600\""));
        assert!(html.contains("max-width: 100%;"));
        assert_eq!(html.matches("<table").count(), html.matches("</table>").count());
    }

    #[test]
    fn test_document_shell() {
        let options = RenderOptions {
            pretty: true,
            ..Default::default()
        };
        let registry = Registry::new(options).unwrap();
        let html = render_document(&registry, &page(), &blocks()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
        assert!(html.contains("  <head>\n    <meta charset=\"utf-8\" />\n"));
        assert!(html.contains("<title>Welcome</title>"));
        assert!(html.contains("content=\"A &quot;quoted&quot; page\""));
        assert!(html.contains("<body style=\"margin: 0;\">"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_invalid_block_fails_whole_page() {
        let registry = Registry::new(RenderOptions::default()).unwrap();
        let blocks = vec![Block::text("ok"), Block::image(" ")];
        assert!(render_page_markup(&registry, &page(), &blocks).is_err());
    }
}
