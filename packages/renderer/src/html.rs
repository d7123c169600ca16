//! VNode → HTML serialization shared by the markup and email targets.

use crate::options::RenderOptions;
use crate::vnode::VNode;

pub(crate) struct HtmlWriter<'a> {
    options: &'a RenderOptions,
    depth: usize,
    buffer: String,
}

impl<'a> HtmlWriter<'a> {
    pub(crate) fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub(crate) fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Insert an already serialized fragment as its own line(s)
    pub(crate) fn add_fragment(&mut self, html: &str) {
        if self.options.pretty {
            for line in html.lines() {
                self.add_line(line);
            }
        } else {
            self.add(html);
        }
    }

    pub(crate) fn write_node(&mut self, node: &VNode) {
        self.write(node, true);
    }

    /// Open `node` as a wrapper; its content is added separately
    pub(crate) fn begin(&mut self, node: &VNode) {
        if self.options.pretty {
            self.add_indent();
        }
        self.open_tag(node);
        self.newline();
        self.indent();
    }

    pub(crate) fn end(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    fn open_tag(&mut self, node: &VNode) -> bool {
        let VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } = node
        else {
            return false;
        };

        self.add("<");
        self.add(tag);
        for (name, value) in attributes {
            self.add(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        let css = styles.to_css_string();
        if !css.is_empty() {
            self.add(&format!(" style=\"{}\"", escape_html(&css)));
        }

        if children.is_empty() && is_self_closing(tag) {
            self.add(" />");
            return false;
        }

        self.add(">");
        true
    }

    fn write(&mut self, node: &VNode, block_context: bool) {
        match node {
            VNode::Text { content } => {
                if block_context && self.options.pretty {
                    self.add_indent();
                    self.add(&escape_html(content));
                    self.newline();
                } else {
                    self.add(&escape_html(content));
                }
            }
            VNode::Element { tag, children, .. } => {
                if block_context && self.options.pretty {
                    self.add_indent();
                }

                if !self.open_tag(node) {
                    if block_context {
                        self.newline();
                    }
                    return;
                }

                let structured = has_element_children(children);
                if structured {
                    self.newline();
                    self.indent();
                    for child in children {
                        self.write(child, true);
                    }
                    self.dedent();
                    if self.options.pretty {
                        self.add_indent();
                    }
                } else {
                    for child in children {
                        self.write(child, false);
                    }
                }

                self.add(&format!("</{}>", tag));
                if block_context {
                    self.newline();
                }
            }
        }
    }

    pub(crate) fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a tree to HTML
pub fn to_html(node: &VNode, options: &RenderOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    writer.write(node, true);
    writer.get_output()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Neutralize script URLs in `href`/`src` values
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    let scheme: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(11)
        .collect::<String>()
        .to_ascii_lowercase();

    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") {
        "#".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "br" | "hr" | "meta" | "link" | "input" | "source" | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, VNode::Element { tag, .. } if tag != "br"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compact() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_compact_element() {
        let node = VNode::element("div")
            .with_attr("class", "box")
            .with_style("backgroundColor", "red")
            .with_child(VNode::element("p").with_child(VNode::text("Hi")));

        assert_eq!(
            to_html(&node, &compact()),
            "<div class=\"box\" style=\"background-color: red;\"><p>Hi</p></div>"
        );
    }

    #[test]
    fn test_self_closing_tags() {
        let node = VNode::element("img").with_attr("src", "a.png");
        assert_eq!(to_html(&node, &compact()), "<img src=\"a.png\" />");
    }

    #[test]
    fn test_escape_text_and_attributes() {
        let node = VNode::element("a")
            .with_attr("title", "\"quoted\"")
            .with_child(VNode::text("Hello <world> & friends"));
        let html = to_html(&node, &compact());

        assert!(html.contains("title=\"&quot;quoted&quot;\""));
        assert!(html.contains("Hello &lt;world&gt; &amp; friends"));
    }

    #[test]
    fn test_pretty_print_nests_elements() {
        let options = RenderOptions {
            pretty: true,
            ..Default::default()
        };
        let node = VNode::element("div").with_child(VNode::element("p").with_child(VNode::text("Hi")));

        assert_eq!(to_html(&node, &options), "<div>\n  <p>Hi</p>\n</div>\n");
    }

    #[test]
    fn test_line_breaks_stay_inline() {
        let node = VNode::element("p")
            .with_child(VNode::text("a"))
            .with_child(VNode::element("br"))
            .with_child(VNode::text("b"));
        let options = RenderOptions {
            pretty: true,
            ..Default::default()
        };

        assert_eq!(to_html(&node, &options), "<p>a<br />b</p>\n");
    }

    #[test]
    fn test_wrapper_with_fragment() {
        let options = RenderOptions {
            pretty: true,
            ..Default::default()
        };
        let mut writer = HtmlWriter::new(&options);
        writer.begin(&VNode::element("body"));
        writer.add_fragment("<div>\n  <p>Hi</p>\n</div>\n");
        writer.end("body");

        assert_eq!(
            writer.get_output(),
            "<body>\n  <div>\n    <p>Hi</p>\n  </div>\n</body>\n"
        );
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(sanitize_url(" https://example.com "), "https://example.com");
        assert_eq!(sanitize_url("javascript:alert(1)"), "#");
        assert_eq!(sanitize_url("JavaScript:alert(1)"), "#");
        assert_eq!(sanitize_url("java\tscript:alert(1)"), "#");
        assert_eq!(sanitize_url("/relative/path"), "/relative/path");
    }
}
