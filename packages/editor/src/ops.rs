//! Forward and inverse implementations behind each command kind.
//!
//! Every op captures what it needs at construction time, so running
//! `execute` or `undo` twice in a row lands in the same state as running it
//! once. A target that has disappeared from the store turns the call into a
//! no-op returning [`Transition::Unchanged`].

use crate::store::{move_within, DocumentStore};
use crate::transition::Transition;
use pagecraft_model::{Block, BlockId, Page, PageId};
use std::fmt;
use tracing::warn;

/// A reversible store mutation
pub trait CommandOp: fmt::Debug {
    fn execute(&self, store: &mut DocumentStore) -> Transition;

    fn undo(&self, store: &mut DocumentStore) -> Transition;

    /// Get a debug name for this op
    fn name(&self) -> &'static str;
}

fn replace_block(store: &mut DocumentStore, block: &Block) -> Transition {
    match store.replace_block(block.clone()) {
        Some(_) => Transition::BlockUpdated {
            block: block.clone(),
        },
        None => Transition::Unchanged,
    }
}

fn insert_block(store: &mut DocumentStore, page_id: PageId, block: &Block, index: usize) -> Transition {
    match store.add_block(page_id, block.clone(), index) {
        Ok(index) => Transition::BlockAdded {
            page_id,
            block: block.clone(),
            index,
        },
        Err(err) => {
            warn!(page = %page_id, "cannot insert block: {}", err);
            Transition::Unchanged
        }
    }
}

fn remove_block(store: &mut DocumentStore, page_id: PageId, block: &Block) -> Transition {
    let Some(block_id) = block.id() else {
        return Transition::Unchanged;
    };
    match store.remove_block(page_id, block_id) {
        Some(_) => Transition::BlockRemoved { page_id, block_id },
        None => Transition::Unchanged,
    }
}

fn restore_block_order(store: &mut DocumentStore, page_id: PageId, order: &[BlockId]) -> Transition {
    match store.set_block_order(page_id, order) {
        Ok(true) => Transition::BlocksReordered {
            page_id,
            order: order.to_vec(),
        },
        Ok(false) => Transition::Unchanged,
        Err(err) => {
            warn!(page = %page_id, "cannot restore block order: {}", err);
            Transition::Unchanged
        }
    }
}

fn restore_page_order(store: &mut DocumentStore, order: &[PageId]) -> Transition {
    match store.set_page_order(order) {
        Ok(true) => Transition::PagesReordered {
            order: order.to_vec(),
        },
        Ok(false) => Transition::Unchanged,
        Err(err) => {
            warn!("cannot restore page order: {}", err);
            Transition::Unchanged
        }
    }
}

/// Full before/after snapshots of one block
#[derive(Debug)]
pub(crate) struct UpdateBlockOp {
    pub before: Block,
    pub after: Block,
}

impl CommandOp for UpdateBlockOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        replace_block(store, &self.after)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        replace_block(store, &self.before)
    }

    fn name(&self) -> &'static str {
        "UpdateBlock"
    }
}

/// Removal capturing the block and the exact index it had
#[derive(Debug)]
pub(crate) struct RemoveBlockOp {
    pub page_id: PageId,
    pub block: Block,
    pub index: usize,
}

impl CommandOp for RemoveBlockOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        remove_block(store, self.page_id, &self.block)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        insert_block(store, self.page_id, &self.block, self.index)
    }

    fn name(&self) -> &'static str {
        "RemoveBlock"
    }
}

#[derive(Debug)]
pub(crate) struct AddBlockOp {
    pub page_id: PageId,
    pub block: Block,
    pub index: usize,
}

impl CommandOp for AddBlockOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        insert_block(store, self.page_id, &self.block, self.index)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        remove_block(store, self.page_id, &self.block)
    }

    fn name(&self) -> &'static str {
        "AddBlock"
    }
}

/// Single-element move. Undo restores the order captured before the move,
/// which a swap of the two ids would not do for non-adjacent moves.
#[derive(Debug)]
pub(crate) struct ReorderBlockOp {
    pub page_id: PageId,
    pub source_id: BlockId,
    pub target_id: BlockId,
    pub before: Vec<BlockId>,
    pub after: Vec<BlockId>,
}

impl ReorderBlockOp {
    pub fn new(page_id: PageId, source_id: BlockId, target_id: BlockId, before: Vec<BlockId>) -> Self {
        let mut after = before.clone();
        move_within(&mut after, source_id, target_id);
        Self {
            page_id,
            source_id,
            target_id,
            before,
            after,
        }
    }
}

impl CommandOp for ReorderBlockOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        if store.page_block_ids(self.page_id) == self.after.as_slice() {
            return Transition::Unchanged;
        }
        if !store.reorder_block(self.page_id, self.source_id, self.target_id) {
            return Transition::Unchanged;
        }
        Transition::BlocksReordered {
            page_id: self.page_id,
            order: store.page_block_ids(self.page_id).to_vec(),
        }
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        restore_block_order(store, self.page_id, &self.before)
    }

    fn name(&self) -> &'static str {
        "ReorderBlock"
    }
}

#[derive(Debug)]
pub(crate) struct ReorderBlocksOp {
    pub page_id: PageId,
    pub before: Vec<BlockId>,
    pub after: Vec<BlockId>,
}

impl CommandOp for ReorderBlocksOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        restore_block_order(store, self.page_id, &self.after)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        restore_block_order(store, self.page_id, &self.before)
    }

    fn name(&self) -> &'static str {
        "ReorderBlocks"
    }
}

#[derive(Debug)]
pub(crate) struct UpdatePageOp {
    pub before: Page,
    pub after: Page,
}

fn replace_page(store: &mut DocumentStore, page: &Page) -> Transition {
    match store.replace_page(page.clone()) {
        Some(_) => Transition::PageUpdated { page: page.clone() },
        None => Transition::Unchanged,
    }
}

impl CommandOp for UpdatePageOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        replace_page(store, &self.after)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        replace_page(store, &self.before)
    }

    fn name(&self) -> &'static str {
        "UpdatePage"
    }
}

#[derive(Debug)]
pub(crate) struct ReorderPageOp {
    pub source_id: PageId,
    pub target_id: PageId,
    pub before: Vec<PageId>,
    pub after: Vec<PageId>,
}

impl ReorderPageOp {
    pub fn new(source_id: PageId, target_id: PageId, before: Vec<PageId>) -> Self {
        let mut after = before.clone();
        move_within(&mut after, source_id, target_id);
        Self {
            source_id,
            target_id,
            before,
            after,
        }
    }
}

impl CommandOp for ReorderPageOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        if store.page_ids() == self.after.as_slice() {
            return Transition::Unchanged;
        }
        if !store.reorder_page(self.source_id, self.target_id) {
            return Transition::Unchanged;
        }
        Transition::PagesReordered {
            order: store.page_ids().to_vec(),
        }
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        restore_page_order(store, &self.before)
    }

    fn name(&self) -> &'static str {
        "ReorderPage"
    }
}

#[derive(Debug)]
pub(crate) struct ReorderPagesOp {
    pub before: Vec<PageId>,
    pub after: Vec<PageId>,
}

impl CommandOp for ReorderPagesOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        restore_page_order(store, &self.after)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        restore_page_order(store, &self.before)
    }

    fn name(&self) -> &'static str {
        "ReorderPages"
    }
}

type StoreFn = Box<dyn Fn(&mut DocumentStore) -> Transition>;

/// Custom op built from a pair of closures over the store primitives
pub(crate) struct FnOp {
    pub execute: StoreFn,
    pub undo: StoreFn,
}

impl fmt::Debug for FnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOp").finish_non_exhaustive()
    }
}

impl CommandOp for FnOp {
    fn execute(&self, store: &mut DocumentStore) -> Transition {
        (self.execute)(store)
    }

    fn undo(&self, store: &mut DocumentStore) -> Transition {
        (self.undo)(store)
    }

    fn name(&self) -> &'static str {
        "Custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(values: &[u64]) -> Vec<BlockId> {
        values.iter().copied().map(BlockId).collect()
    }

    fn store_with(values: &[u64]) -> DocumentStore {
        let mut store = DocumentStore::new();
        store.upsert_page(Page::new(1u64));
        store
            .upsert_blocks(
                PageId(1),
                values
                    .iter()
                    .map(|id| Block::text(format!("Block {}", id)).with_id(*id))
                    .collect(),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_reorder_undo_restores_non_adjacent_move() {
        let mut store = store_with(&[1, 2, 3, 4]);
        let op = ReorderBlockOp::new(PageId(1), BlockId(1), BlockId(3), ids(&[1, 2, 3, 4]));

        op.execute(&mut store);
        assert_eq!(store.page_block_ids(PageId(1)), ids(&[2, 3, 1, 4]).as_slice());

        op.undo(&mut store);
        assert_eq!(store.page_block_ids(PageId(1)), ids(&[1, 2, 3, 4]).as_slice());
    }

    #[test]
    fn test_reorder_execute_is_idempotent() {
        let mut store = store_with(&[1, 2, 3]);
        let op = ReorderBlockOp::new(PageId(1), BlockId(1), BlockId(3), ids(&[1, 2, 3]));

        assert!(!op.execute(&mut store).is_unchanged());
        assert!(op.execute(&mut store).is_unchanged());
        assert_eq!(store.page_block_ids(PageId(1)), ids(&[2, 3, 1]).as_slice());
    }

    #[test]
    fn test_remove_undo_reinserts_at_index() {
        let mut store = store_with(&[1, 2, 3]);
        let block = store.block(BlockId(2)).cloned().unwrap();
        let op = RemoveBlockOp {
            page_id: PageId(1),
            block,
            index: 1,
        };

        assert_eq!(
            op.execute(&mut store),
            Transition::BlockRemoved {
                page_id: PageId(1),
                block_id: BlockId(2)
            }
        );
        assert!(op.execute(&mut store).is_unchanged());

        op.undo(&mut store);
        assert_eq!(store.page_block_ids(PageId(1)), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_missing_targets_are_unchanged() {
        let mut store = DocumentStore::new();
        let update = UpdateBlockOp {
            before: Block::text("a").with_id(1u64),
            after: Block::text("b").with_id(1u64),
        };
        let pages = ReorderPageOp::new(PageId(1), PageId(2), vec![PageId(1), PageId(2)]);

        assert!(update.execute(&mut store).is_unchanged());
        assert!(update.undo(&mut store).is_unchanged());
        assert!(pages.execute(&mut store).is_unchanged());
        assert!(pages.undo(&mut store).is_unchanged());
    }
}
