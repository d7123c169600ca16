use pagecraft_model::{BlockType, ModelError};
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

/// Invalid document state found at render time. There is no fallback
/// rendering for any of these.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid block: {0}")]
    Model(#[from] ModelError),

    #[error("No renderer registered for block type {0}")]
    UnregisteredType(BlockType),

    #[error("Renderer for {expected} blocks cannot render a {found} block")]
    TypeMismatch {
        expected: BlockType,
        found: BlockType,
    },
}
