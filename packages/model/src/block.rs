use crate::error::{ModelError, ModelResult};
use crate::ids::BlockId;
use crate::merge::deep_merge;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Discriminant of the closed set of block variants
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum BlockType {
    Text,
    Image,
    Button,
}

/// Horizontal placement of a container's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

/// Wrapper properties shared by every block variant and by pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ContainerStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextData {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ImageStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ButtonStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

/// Fields common to every block variant, parameterized by the variant's
/// data and style shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord<D, S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    /// Ordering hint only; the store's id list is authoritative
    #[serde(default)]
    pub order: i64,
    pub data: D,
    #[serde(default)]
    pub style: S,
    #[serde(default)]
    pub container_style: ContainerStyle,
}

impl<D, S: Default> BlockRecord<D, S> {
    pub fn new(data: D) -> Self {
        Self {
            id: None,
            slug: String::new(),
            name: String::new(),
            order: 0,
            data,
            style: S::default(),
            container_style: ContainerStyle::default(),
        }
    }
}

pub type TextBlock = BlockRecord<TextData, TextStyle>;
pub type ImageBlock = BlockRecord<ImageData, ImageStyle>;
pub type ButtonBlock = BlockRecord<ButtonData, ButtonStyle>;

/// A typed content unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
    Button(ButtonBlock),
}

macro_rules! on_record {
    ($block:expr, $record:ident => $body:expr) => {
        match $block {
            Block::Text($record) => $body,
            Block::Image($record) => $body,
            Block::Button($record) => $body,
        }
    };
}

impl Block {
    pub fn text(value: impl Into<String>) -> Self {
        Block::Text(BlockRecord::new(TextData {
            value: value.into(),
        }))
    }

    pub fn image(url: impl Into<String>) -> Self {
        Block::Image(BlockRecord::new(ImageData {
            url: url.into(),
            link: None,
            alt: None,
        }))
    }

    pub fn button(text: impl Into<String>, link: Option<String>) -> Self {
        Block::Button(BlockRecord::new(ButtonData {
            link,
            text: text.into(),
        }))
    }

    /// Parse and validate a raw record, e.g. one fetched by the persistence
    /// client.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        let tag = value.get("type").ok_or(ModelError::MissingType)?;
        let tag = tag
            .as_str()
            .ok_or_else(|| ModelError::UnknownBlockType(tag.to_string()))?;
        let block_type = BlockType::from_str(tag)
            .map_err(|_| ModelError::UnknownBlockType(tag.to_string()))?;

        let block: Block = serde_json::from_value(value)
            .map_err(|e| ModelError::shape_mismatch(block_type, e.to_string()))?;
        block.validate()?;
        Ok(block)
    }

    pub fn to_value(&self) -> ModelResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Content checks that serde cannot express
    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Block::Text(_) => Ok(()),
            Block::Image(record) if record.data.url.trim().is_empty() => Err(
                ModelError::shape_mismatch(BlockType::Image, "data.url must not be empty"),
            ),
            Block::Button(record) if record.data.text.trim().is_empty() => Err(
                ModelError::shape_mismatch(BlockType::Button, "data.text must not be empty"),
            ),
            Block::Image(_) | Block::Button(_) => Ok(()),
        }
    }

    /// Deep-merge a partial JSON update and re-validate the result.
    ///
    /// The type tag is fixed: a patch that would change it is rejected.
    pub fn merged(&self, patch: &Value) -> ModelResult<Self> {
        let mut value = self.to_value()?;
        deep_merge(&mut value, patch);
        let merged = Block::from_value(value)?;

        if merged.block_type() != self.block_type() {
            return Err(ModelError::shape_mismatch(
                self.block_type(),
                "an update cannot change the block type",
            ));
        }

        Ok(merged)
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Text(_) => BlockType::Text,
            Block::Image(_) => BlockType::Image,
            Block::Button(_) => BlockType::Button,
        }
    }

    pub fn id(&self) -> Option<BlockId> {
        on_record!(self, record => record.id)
    }

    pub fn slug(&self) -> &str {
        on_record!(self, record => &record.slug)
    }

    pub fn name(&self) -> &str {
        on_record!(self, record => &record.name)
    }

    pub fn order(&self) -> i64 {
        on_record!(self, record => record.order)
    }

    pub fn container_style(&self) -> &ContainerStyle {
        on_record!(self, record => &record.container_style)
    }

    pub fn container_style_mut(&mut self) -> &mut ContainerStyle {
        on_record!(self, record => &mut record.container_style)
    }

    pub fn set_id(&mut self, id: BlockId) {
        on_record!(self, record => record.id = Some(id))
    }

    pub fn set_order(&mut self, order: i64) {
        on_record!(self, record => record.order = order)
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.set_id(id.into());
        self
    }

    pub fn with_container_style(mut self, container_style: ContainerStyle) -> Self {
        *self.container_style_mut() = container_style;
        self
    }
}
