//! # Commands
//!
//! A command is an immutable, reversible unit of document mutation. It is
//! built from the state it applies to, so its inverse never has to be
//! recomputed: `undo` puts back exactly what was captured.
//!
//! ```rust,ignore
//! let before = store.page_block_ids(page_id).to_vec();
//! let command = Command::reorder_block(page_id, source, target, before)
//!     .with_description("Move block");
//! history.execute(command, page_id, &mut store);
//! ```

use crate::errors::EditorError;
use crate::ops::{
    AddBlockOp, CommandOp, FnOp, RemoveBlockOp, ReorderBlockOp, ReorderBlocksOp, ReorderPageOp,
    ReorderPagesOp, UpdateBlockOp, UpdatePageOp,
};
use crate::store::DocumentStore;
use crate::transition::Transition;
use chrono::{DateTime, Utc};
use pagecraft_model::{Block, BlockId, Page, PageId};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tracing::trace;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CommandKind {
    UpdateBlock,
    RemoveBlock,
    AddBlock,
    ReorderBlock,
    ReorderBlocks,
    UpdatePage,
    ReorderPage,
    ReorderPages,
}

#[derive(Debug)]
pub struct Command {
    id: String,
    kind: CommandKind,
    timestamp: DateTime<Utc>,
    description: Option<String>,
    op: Box<dyn CommandOp>,
}

impl Command {
    fn new(kind: CommandKind, op: Box<dyn CommandOp>) -> Self {
        let timestamp = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!(
            "{}-{}",
            timestamp.timestamp_millis(),
            suffix.get(..8).unwrap_or(&suffix)
        );

        Self {
            id,
            kind,
            timestamp,
            description: None,
            op,
        }
    }

    /// Replace a block with `after`, restoring `before` on undo.
    ///
    /// `after` must be a valid record of the same type as `before`.
    pub fn update_block(before: Block, mut after: Block) -> Result<Self, EditorError> {
        let id = before.id().ok_or(EditorError::MissingBlockId)?;
        if after.block_type() != before.block_type() {
            return Err(EditorError::TypeMismatch {
                expected: before.block_type(),
                found: after.block_type(),
            });
        }
        after.validate()?;
        after.set_id(id);
        Ok(Self::new(
            CommandKind::UpdateBlock,
            Box::new(UpdateBlockOp { before, after }),
        ))
    }

    /// Remove `block`, which sits at `index` on the page
    pub fn remove_block(page_id: PageId, block: Block, index: usize) -> Result<Self, EditorError> {
        block.id().ok_or(EditorError::MissingBlockId)?;
        Ok(Self::new(
            CommandKind::RemoveBlock,
            Box::new(RemoveBlockOp {
                page_id,
                block,
                index,
            }),
        ))
    }

    pub fn add_block(page_id: PageId, block: Block, index: usize) -> Result<Self, EditorError> {
        block.id().ok_or(EditorError::MissingBlockId)?;
        Ok(Self::new(
            CommandKind::AddBlock,
            Box::new(AddBlockOp {
                page_id,
                block,
                index,
            }),
        ))
    }

    /// Move `source_id` to `target_id`'s position; `before` is the page's
    /// current block order
    pub fn reorder_block(
        page_id: PageId,
        source_id: BlockId,
        target_id: BlockId,
        before: Vec<BlockId>,
    ) -> Self {
        Self::new(
            CommandKind::ReorderBlock,
            Box::new(ReorderBlockOp::new(page_id, source_id, target_id, before)),
        )
    }

    pub fn reorder_blocks(page_id: PageId, before: Vec<BlockId>, after: Vec<BlockId>) -> Self {
        Self::new(
            CommandKind::ReorderBlocks,
            Box::new(ReorderBlocksOp {
                page_id,
                before,
                after,
            }),
        )
    }

    pub fn update_page(before: Page, mut after: Page) -> Self {
        after.id = before.id;
        Self::new(
            CommandKind::UpdatePage,
            Box::new(UpdatePageOp { before, after }),
        )
    }

    pub fn reorder_page(source_id: PageId, target_id: PageId, before: Vec<PageId>) -> Self {
        Self::new(
            CommandKind::ReorderPage,
            Box::new(ReorderPageOp::new(source_id, target_id, before)),
        )
    }

    pub fn reorder_pages(before: Vec<PageId>, after: Vec<PageId>) -> Self {
        Self::new(
            CommandKind::ReorderPages,
            Box::new(ReorderPagesOp { before, after }),
        )
    }

    /// Custom command from a user-defined op
    pub fn from_op(kind: CommandKind, op: impl CommandOp + 'static) -> Self {
        Self::new(kind, Box::new(op))
    }

    /// Custom command from a pair of closures over the store primitives.
    ///
    /// Both closures should be idempotent and each must reverse the other.
    pub fn from_fns<E, U>(kind: CommandKind, execute: E, undo: U) -> Self
    where
        E: Fn(&mut DocumentStore) -> Transition + 'static,
        U: Fn(&mut DocumentStore) -> Transition + 'static,
    {
        Self::from_op(
            kind,
            FnOp {
                execute: Box::new(execute),
                undo: Box::new(undo),
            },
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn execute(&self, store: &mut DocumentStore) -> Transition {
        trace!(id = %self.id, kind = %self.kind, op = self.op.name(), "execute");
        self.op.execute(store)
    }

    pub fn undo(&self, store: &mut DocumentStore) -> Transition {
        trace!(id = %self.id, kind = %self.kind, op = self.op.name(), "undo");
        self.op.undo(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::BlockType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_are_unique_and_time_prefixed() {
        let a = Command::reorder_pages(vec![], vec![]);
        let b = Command::reorder_pages(vec![], vec![]);

        assert_ne!(a.id(), b.id());
        let (millis, suffix) = a.id().split_once('-').unwrap();
        assert_eq!(millis.parse::<i64>().unwrap(), a.timestamp().timestamp_millis());
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(CommandKind::ReorderBlocks.to_string(), "reorder-blocks");
        assert_eq!(
            serde_json::to_value(CommandKind::UpdatePage).unwrap(),
            "update-page"
        );
    }

    #[test]
    fn test_block_commands_need_an_id() {
        let draft = Block::text("draft");

        assert!(matches!(
            Command::add_block(PageId(1), draft.clone(), 0),
            Err(EditorError::MissingBlockId)
        ));
        assert!(matches!(
            Command::remove_block(PageId(1), draft.clone(), 0),
            Err(EditorError::MissingBlockId)
        ));
        assert!(matches!(
            Command::update_block(draft.clone(), draft),
            Err(EditorError::MissingBlockId)
        ));
    }

    #[test]
    fn test_update_block_rejects_other_types_and_invalid_records() {
        let before = Block::text("old").with_id(1u64);

        assert!(matches!(
            Command::update_block(before.clone(), Block::image("hero.png")),
            Err(EditorError::TypeMismatch {
                expected: BlockType::Text,
                found: BlockType::Image
            })
        ));

        let image = Block::image("hero.png").with_id(2u64);
        assert!(matches!(
            Command::update_block(image, Block::image("")),
            Err(EditorError::Model(_))
        ));
    }

    #[test]
    fn test_update_block_pins_the_id() {
        let mut store = DocumentStore::new();
        store
            .upsert_block(PageId(1), Block::text("old").with_id(1u64))
            .unwrap();

        let command = Command::update_block(
            Block::text("old").with_id(1u64),
            Block::text("new"),
        )
        .unwrap()
        .with_description("Edit text");

        assert_eq!(command.kind(), CommandKind::UpdateBlock);
        assert_eq!(command.description(), Some("Edit text"));

        let transition = command.execute(&mut store);
        assert_eq!(
            transition,
            Transition::BlockUpdated {
                block: Block::text("new").with_id(1u64)
            }
        );

        command.undo(&mut store);
        assert_eq!(store.block(BlockId(1)), Some(&Block::text("old").with_id(1u64)));
    }
}
