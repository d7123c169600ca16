use crate::block::BlockType;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Invalid document state detected while reading block or page records
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Block record has no type tag")]
    MissingType,

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Invalid {block_type} block: {message}")]
    ShapeMismatch {
        block_type: BlockType,
        message: String,
    },

    #[error("Invalid page record: {0}")]
    InvalidPage(String),

    #[error("Invalid block at index {index}: {source}")]
    InvalidBlock {
        index: usize,
        #[source]
        source: Box<ModelError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn shape_mismatch(block_type: BlockType, message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            block_type,
            message: message.into(),
        }
    }
}
