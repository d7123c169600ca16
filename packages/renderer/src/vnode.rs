use indexmap::IndexMap;
use pagecraft_model::BlockId;
use pagecraft_style::CssProperties;
use serde::{Deserialize, Serialize};

/// Links a node of the interactive tree to the block field it edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    /// Dotted path into the block record, e.g. `data.value`
    pub field: String,
}

/// UI tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        styles: CssProperties,
        children: Vec<VNode>,
        /// Stable identity for the UI layer's reconciliation (the block id)
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Editable field this element displays
        #[serde(skip_serializing_if = "Option::is_none")]
        binding: Option<FieldBinding>,
    },

    /// Text node
    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: IndexMap::new(),
            styles: CssProperties::new(),
            children: Vec::new(),
            key: None,
            binding: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.set(key, value);
        }
        self
    }

    pub fn with_styles(mut self, properties: CssProperties) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(properties);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_key(mut self, new_key: impl Into<String>) -> Self {
        if let VNode::Element { ref mut key, .. } = self {
            *key = Some(new_key.into());
        }
        self
    }

    pub fn with_binding(mut self, block_id: Option<BlockId>, field: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut binding, ..
        } = self
        {
            *binding = Some(FieldBinding {
                block_id,
                field: field.into(),
            });
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            VNode::Element { key, .. } => key.as_deref(),
            VNode::Text { .. } => None,
        }
    }

    pub fn binding(&self) -> Option<&FieldBinding> {
        match self {
            VNode::Element { binding, .. } => binding.as_ref(),
            VNode::Text { .. } => None,
        }
    }

    /// Depth-first search for the first element with `tag`
    pub fn find_tag(&self, wanted: &str) -> Option<&VNode> {
        if self.tag() == Some(wanted) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find_tag(wanted))
    }

    /// Visible text of the subtree; `<br>` counts as a newline
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text { content } => out.push_str(content),
            VNode::Element { tag, children, .. } => {
                if tag == "br" {
                    out.push('\n');
                }
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Text nodes for a plain-text value, with `<br>` elements at newlines
pub fn text_lines(value: &str) -> Vec<VNode> {
    let mut nodes = Vec::new();

    for (i, line) in value.split('\n').enumerate() {
        if i > 0 {
            nodes.push(VNode::element("br"));
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            nodes.push(VNode::text(line));
        }
    }

    nodes
}
