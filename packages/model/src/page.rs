use crate::block::{Block, ContainerStyle};
use crate::error::{ModelError, ModelResult};
use crate::ids::PageId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page-level metadata used by the document shell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// A page record. Its ordered block ids live in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub container_style: ContainerStyle,
    #[serde(default)]
    pub meta: PageMeta,
}

impl Page {
    pub fn new(id: impl Into<PageId>) -> Self {
        Self {
            id: id.into(),
            slug: String::new(),
            name: String::new(),
            order: 0,
            container_style: ContainerStyle::default(),
            meta: PageMeta::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Hydration unit: a page with its blocks embedded in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(flatten)]
    pub page: Page,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl PageDocument {
    pub fn new(page: Page, blocks: Vec<Block>) -> Self {
        Self { page, blocks }
    }

    /// Parse a fetched document, validating every block individually so the
    /// error names the offending position.
    pub fn from_json(source: &str) -> ModelResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> ModelResult<Self> {
        let object = value
            .as_object_mut()
            .ok_or_else(|| ModelError::InvalidPage("expected a JSON object".to_string()))?;

        let raw_blocks = match object.remove("blocks") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(ModelError::InvalidPage(
                    "`blocks` must be an array".to_string(),
                ))
            }
        };

        let page: Page =
            serde_json::from_value(value).map_err(|e| ModelError::InvalidPage(e.to_string()))?;

        let blocks = raw_blocks
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Block::from_value(raw).map_err(|source| ModelError::InvalidBlock {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(Self { page, blocks })
    }
}
