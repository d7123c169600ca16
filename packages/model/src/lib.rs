//! # Pagecraft Model
//!
//! Canonical document model shared by the store, the history and the
//! renderers.
//!
//! ## Shape
//!
//! ```text
//! PageDocument
//!   ├── Page            (id, slug, name, order, containerStyle, meta)
//!   └── blocks: [Block] (Text | Image | Button)
//!         ├── data            (variant-specific content)
//!         ├── style           (variant-specific presentation)
//!         └── containerStyle  (shared wrapper properties)
//! ```
//!
//! The `type` tag fixes the shape of `data` and `style`. Records coming from
//! outside (persistence, files) go through [`Block::from_value`] or
//! [`PageDocument::from_json`], which reject unknown types and shape
//! mismatches instead of guessing.

pub mod block;
pub mod error;
pub mod ids;
pub mod merge;
pub mod page;

pub use block::{
    Align, Block, BlockRecord, BlockType, ButtonBlock, ButtonData, ButtonStyle, ContainerStyle,
    ImageBlock, ImageData, ImageStyle, TextBlock, TextData, TextStyle,
};
pub use error::{ModelError, ModelResult};
pub use ids::{BlockId, PageId};
pub use merge::deep_merge;
pub use page::{Page, PageDocument, PageMeta};
