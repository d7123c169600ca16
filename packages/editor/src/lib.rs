//! # Pagecraft Editor
//!
//! Document editing engine for block-based pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI intents (update, add, remove, move, ...) │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: commands + per-page history         │
//! │  - Capture before/after state               │
//! │  - Bounded undo/redo per page               │
//! │  - Reentrancy guard                         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: blocks by id, ordered ids per page   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//!        Transition → persistence client
//! ```
//!
//! ## Core Principles
//!
//! 1. **Store is the source of truth**: rendered trees and markup are views
//! 2. **Commands are immutable**: inverses are captured, never recomputed
//! 3. **Optimistic edits**: the store changes first; a rejected save is
//!    reconciled by running the command's inverse
//! 4. **No globals**: the host owns one store and one history per session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Editor, EditorConfig};
//!
//! let mut editor = Editor::new(&EditorConfig::default());
//! editor.hydrate(PageDocument::from_json(&source)?)?;
//!
//! let transition = editor.patch_block(id, BlockType::Text, &json!({ "data": { "value": "Hi" } }))?;
//! editor.undo(page_id);
//! ```

mod command;
mod config;
mod editor;
mod errors;
mod history;
mod ops;
mod store;
mod transition;

pub use command::{Command, CommandKind};
pub use config::{EditorConfig, DEFAULT_HISTORY_LIMIT};
pub use editor::{Editor, EditorResult};
pub use errors::{EditorError, StoreError, StoreResult};
pub use history::HistoryManager;
pub use ops::CommandOp;
pub use store::DocumentStore;
pub use transition::Transition;
