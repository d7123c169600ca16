//! # Editor Session
//!
//! One open document: a [`DocumentStore`] plus its [`HistoryManager`].
//!
//! Each intent captures the state it changes, builds the matching command
//! and runs it through the history. Intents that find nothing to do return
//! `None` and record nothing; malformed input is an `Err`.

use crate::command::Command;
use crate::config::EditorConfig;
use crate::errors::{EditorError, StoreError};
use crate::history::HistoryManager;
use crate::store::{is_permutation, DocumentStore};
use crate::transition::Transition;
use pagecraft_model::{Block, BlockId, BlockType, Page, PageDocument, PageId};
use serde_json::Value;
use tracing::{debug, info};

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Default)]
pub struct Editor {
    store: DocumentStore,
    history: HistoryManager,
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            store: DocumentStore::new(),
            history: HistoryManager::new(config),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Load a fetched page. Any history recorded for it is stale and dropped.
    pub fn hydrate(&mut self, document: PageDocument) -> EditorResult<()> {
        let page_id = document.page.id;
        self.store.hydrate(document)?;
        self.history.clear_page(page_id);
        info!(page = %page_id, blocks = self.store.page_block_ids(page_id).len(), "hydrated page");
        Ok(())
    }

    /// Load the page list
    pub fn load_pages(&mut self, pages: Vec<Page>) {
        self.store.upsert_pages(pages);
    }

    /// Run a custom command in `page_id`'s history
    pub fn execute(&mut self, command: Command, page_id: PageId) -> Option<Transition> {
        self.history.execute(command, page_id, &mut self.store)
    }

    /// Replace a block with a new full value of the same type
    pub fn update_block(&mut self, block: Block) -> EditorResult<Option<Transition>> {
        let id = block.id().ok_or(EditorError::MissingBlockId)?;
        let Some(before) = self.store.block(id) else {
            return Ok(None);
        };
        if before.block_type() != block.block_type() || *before == block {
            return Ok(None);
        }

        let before = before.clone();
        self.record_block_update(id, before, block)
    }

    /// Deep-merge a partial JSON update into a block of the expected type
    pub fn patch_block(&mut self, id: BlockId, expected: BlockType, patch: &Value) -> EditorResult<Option<Transition>> {
        let Some(before) = self.store.block(id) else {
            return Ok(None);
        };
        if before.block_type() != expected {
            return Ok(None);
        }

        let mut after = before.merged(patch)?;
        after.set_id(id);
        if *before == after {
            return Ok(None);
        }

        let before = before.clone();
        self.record_block_update(id, before, after)
    }

    fn record_block_update(&mut self, id: BlockId, before: Block, after: Block) -> EditorResult<Option<Transition>> {
        let Some(page_id) = self.store.page_of_block(id) else {
            return Ok(None);
        };
        let command = Command::update_block(before, after)?.with_description("Update block");
        Ok(self.execute(command, page_id))
    }

    /// Insert a new block at `index`; indexes past the end append
    pub fn add_block(&mut self, page_id: PageId, block: Block, index: usize) -> EditorResult<Option<Transition>> {
        let id = block.id().ok_or(EditorError::MissingBlockId)?;
        if self.store.block(id).is_some() {
            return Err(EditorError::DuplicateBlock(id));
        }
        block.validate()?;
        if !self.store.has_page_blocks(page_id) {
            return Ok(None);
        }

        let index = index.min(self.store.page_block_ids(page_id).len());
        let command = Command::add_block(page_id, block, index)?.with_description("Add block");
        Ok(self.execute(command, page_id))
    }

    pub fn remove_block(&mut self, page_id: PageId, block_id: BlockId) -> Option<Transition> {
        let index = self.store.block_index(page_id, block_id)?;
        let block = self.store.block(block_id)?.clone();

        let command = Command::remove_block(page_id, block, index)
            .ok()?
            .with_description("Remove block");
        self.execute(command, page_id)
    }

    /// Move `source_id` to the position `target_id` currently holds
    pub fn move_block(&mut self, page_id: PageId, source_id: BlockId, target_id: BlockId) -> Option<Transition> {
        if source_id == target_id {
            return None;
        }
        self.store.block_index(page_id, source_id)?;
        self.store.block_index(page_id, target_id)?;

        let before = self.store.page_block_ids(page_id).to_vec();
        let command = Command::reorder_block(page_id, source_id, target_id, before).with_description("Move block");
        self.execute(command, page_id)
    }

    pub fn move_block_up(&mut self, page_id: PageId, block_id: BlockId) -> Option<Transition> {
        let index = self.store.block_index(page_id, block_id)?;
        let target = *self.store.page_block_ids(page_id).get(index.checked_sub(1)?)?;
        self.move_block(page_id, block_id, target)
    }

    pub fn move_block_down(&mut self, page_id: PageId, block_id: BlockId) -> Option<Transition> {
        let index = self.store.block_index(page_id, block_id)?;
        let target = *self.store.page_block_ids(page_id).get(index + 1)?;
        self.move_block(page_id, block_id, target)
    }

    /// Set a page's whole block order, e.g. after a drag and drop
    pub fn reorder_blocks(&mut self, page_id: PageId, order: Vec<BlockId>) -> EditorResult<Option<Transition>> {
        if !self.store.has_page_blocks(page_id) {
            return Ok(None);
        }
        let before = self.store.page_block_ids(page_id).to_vec();
        if !is_permutation(&before, &order) {
            return Err(StoreError::NotABlockPermutation { page_id }.into());
        }
        if before == order {
            return Ok(None);
        }

        let command = Command::reorder_blocks(page_id, before, order).with_description("Reorder blocks");
        Ok(self.execute(command, page_id))
    }

    /// Replace a page record. Like the page list commands, the command is
    /// recorded in the history of `current_page`.
    pub fn update_page(&mut self, current_page: PageId, page: Page) -> Option<Transition> {
        let before = self.store.page(page.id)?;
        if *before == page {
            return None;
        }

        let command = Command::update_page(before.clone(), page).with_description("Update page");
        self.execute(command, current_page)
    }

    /// Move a page in the page list. The command is recorded in the history
    /// of `current_page`, the page being edited.
    pub fn reorder_page(&mut self, current_page: PageId, source_id: PageId, target_id: PageId) -> Option<Transition> {
        if source_id == target_id {
            return None;
        }
        let page_ids = self.store.page_ids();
        if !page_ids.contains(&source_id) || !page_ids.contains(&target_id) {
            return None;
        }

        let command = Command::reorder_page(source_id, target_id, page_ids.to_vec()).with_description("Move page");
        self.execute(command, current_page)
    }

    pub fn reorder_pages(&mut self, current_page: PageId, order: Vec<PageId>) -> EditorResult<Option<Transition>> {
        let before = self.store.page_ids().to_vec();
        if !is_permutation(&before, &order) {
            return Err(StoreError::NotAPagePermutation.into());
        }
        if before == order {
            return Ok(None);
        }

        let command = Command::reorder_pages(before, order).with_description("Reorder pages");
        Ok(self.execute(command, current_page))
    }

    pub fn undo(&mut self, page_id: PageId) -> Option<Transition> {
        self.history.undo(page_id, &mut self.store)
    }

    pub fn redo(&mut self, page_id: PageId) -> Option<Transition> {
        self.history.redo(page_id, &mut self.store)
    }

    pub fn can_undo(&self, page_id: PageId) -> bool {
        self.history.can_undo(page_id)
    }

    pub fn can_redo(&self, page_id: PageId) -> bool {
        self.history.can_redo(page_id)
    }

    /// Leave a page: drop its blocks and its history
    pub fn close_page(&mut self, page_id: PageId) {
        self.store.unload_page(page_id);
        self.history.clear_page(page_id);
        debug!(page = %page_id, "closed page");
    }

    pub fn reset(&mut self) {
        self.store.clear();
        self.history.clear();
    }
}
