//! Error types for the editor

use pagecraft_model::{BlockId, BlockType, ModelError, PageId};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid block: {0}")]
    Model(#[from] ModelError),

    #[error("Block has no id; only persisted blocks can be stored")]
    MissingBlockId,

    #[error("Block {0} is listed twice")]
    DuplicateBlock(BlockId),

    #[error("New block order for page {page_id} is not a permutation of the current one")]
    NotABlockPermutation { page_id: PageId },

    #[error("New page order is not a permutation of the current one")]
    NotAPagePermutation,
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Block has no id; save it before building a command for it")]
    MissingBlockId,

    #[error("Block {0} already exists")]
    DuplicateBlock(BlockId),

    #[error("Cannot replace a {expected} block with a {found} block")]
    TypeMismatch { expected: BlockType, found: BlockType },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid block: {0}")]
    Model(#[from] ModelError),
}
