//! # Document Store
//!
//! Sole mutable source of truth for block content, per-page block ordering
//! and the page list.
//!
//! Block records are kept by id; each page owns an ordered list of block ids
//! and that list order is the render order. The store maintains three
//! invariants after every operation:
//!
//! - every id listed on a page has a record
//! - no id is listed twice on one page
//! - an id is listed on at most one page
//!
//! All operations are synchronous and never perform I/O. Conditions that
//! leave nothing to do (unknown ids, unchanged values) are reported through
//! `bool`/`Option` returns; malformed input is an error.

use crate::errors::{StoreError, StoreResult};
use pagecraft_model::{Block, BlockId, BlockType, Page, PageDocument, PageId};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    blocks_by_id: HashMap<BlockId, Block>,
    block_ids_by_page: HashMap<PageId, Vec<BlockId>>,
    pages_by_id: HashMap<PageId, Page>,
    page_ids: Vec<PageId>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Blocks
    // ---------------------------------------------------------------------

    /// Replace the full ordered block list of a page and merge the records.
    ///
    /// Blocks previously on the page but absent from `blocks` are dropped.
    /// The input is checked as a whole before anything changes.
    pub fn upsert_blocks(&mut self, page_id: PageId, blocks: Vec<Block>) -> StoreResult<()> {
        let mut order = Vec::with_capacity(blocks.len());
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            let id = block.id().ok_or(StoreError::MissingBlockId)?;
            if !seen.insert(id) {
                return Err(StoreError::DuplicateBlock(id));
            }
            order.push(id);
        }

        if let Some(previous) = self.block_ids_by_page.get(&page_id) {
            let dropped: Vec<BlockId> = previous
                .iter()
                .filter(|id| !seen.contains(id))
                .copied()
                .collect();
            for id in dropped {
                self.blocks_by_id.remove(&id);
            }
        }

        for block in blocks {
            if let Some(id) = block.id() {
                self.detach(id, page_id);
                self.blocks_by_id.insert(id, block);
            }
        }

        debug!(page = %page_id, blocks = order.len(), "upserted page blocks");
        self.block_ids_by_page.insert(page_id, order);
        Ok(())
    }

    /// Insert or replace one block, appending it to the page order if it is
    /// not listed there yet
    pub fn upsert_block(&mut self, page_id: PageId, block: Block) -> StoreResult<()> {
        let id = block.id().ok_or(StoreError::MissingBlockId)?;
        self.detach(id, page_id);

        let order = self.block_ids_by_page.entry(page_id).or_default();
        if !order.contains(&id) {
            order.push(id);
        }
        self.blocks_by_id.insert(id, block);

        trace!(page = %page_id, block = %id, "upserted block");
        Ok(())
    }

    /// Insert a block at `index`, clamped to the end of the list.
    ///
    /// A block already listed on the page is moved rather than duplicated.
    /// Returns the index the block ended up at.
    pub fn add_block(&mut self, page_id: PageId, block: Block, index: usize) -> StoreResult<usize> {
        let id = block.id().ok_or(StoreError::MissingBlockId)?;
        self.detach(id, page_id);

        let order = self.block_ids_by_page.entry(page_id).or_default();
        order.retain(|existing| *existing != id);
        let index = index.min(order.len());
        order.insert(index, id);
        self.blocks_by_id.insert(id, block);

        trace!(page = %page_id, block = %id, index, "added block");
        Ok(index)
    }

    /// Remove a block from the page order and drop its record.
    ///
    /// Returns the removed record and the index it had, or `None` if the
    /// block is not listed on the page.
    pub fn remove_block(&mut self, page_id: PageId, block_id: BlockId) -> Option<(Block, usize)> {
        let order = self.block_ids_by_page.get_mut(&page_id)?;
        let index = order.iter().position(|id| *id == block_id)?;
        order.remove(index);

        let block = self.blocks_by_id.remove(&block_id)?;
        trace!(page = %page_id, block = %block_id, index, "removed block");
        Some((block, index))
    }

    /// Move `source_id` to the position `target_id` holds before the move
    pub fn reorder_block(&mut self, page_id: PageId, source_id: BlockId, target_id: BlockId) -> bool {
        let Some(order) = self.block_ids_by_page.get_mut(&page_id) else {
            return false;
        };
        move_within(order, source_id, target_id)
    }

    /// Deep-merge a partial JSON update into a block of the expected type.
    ///
    /// Returns `Ok(false)` when the block is missing, has a different type or
    /// the merge changes nothing. An update producing an invalid block is an
    /// error and leaves the store untouched.
    pub fn update_block(&mut self, id: BlockId, expected: BlockType, patch: &Value) -> StoreResult<bool> {
        let Some(previous) = self.blocks_by_id.get(&id) else {
            return Ok(false);
        };
        if previous.block_type() != expected {
            return Ok(false);
        }

        let mut updated = previous.merged(patch)?;
        updated.set_id(id);
        Ok(self.commit_block(id, updated))
    }

    /// Like [`update_block`](Self::update_block) with an updater computing
    /// the next value from the previous one
    pub fn update_block_with<F>(&mut self, id: BlockId, expected: BlockType, updater: F) -> StoreResult<bool>
    where
        F: FnOnce(&Block) -> Block,
    {
        let Some(previous) = self.blocks_by_id.get(&id) else {
            return Ok(false);
        };
        if previous.block_type() != expected {
            return Ok(false);
        }

        let mut updated = updater(previous);
        if updated.block_type() != expected {
            return Ok(false);
        }
        updated.validate()?;
        updated.set_id(id);
        Ok(self.commit_block(id, updated))
    }

    /// Overwrite an existing record with a full snapshot, returning the
    /// previous value. Blocks without an id or not in the store are ignored.
    pub fn replace_block(&mut self, block: Block) -> Option<Block> {
        let id = block.id()?;
        let slot = self.blocks_by_id.get_mut(&id)?;
        Some(std::mem::replace(slot, block))
    }

    /// Set a page's block order. `ids` must be a permutation of the current
    /// list.
    pub fn set_block_order(&mut self, page_id: PageId, ids: &[BlockId]) -> StoreResult<bool> {
        let Some(order) = self.block_ids_by_page.get_mut(&page_id) else {
            return Ok(false);
        };
        if !is_permutation(order, ids) {
            return Err(StoreError::NotABlockPermutation { page_id });
        }
        if order.as_slice() == ids {
            return Ok(false);
        }

        *order = ids.to_vec();
        trace!(page = %page_id, "set block order");
        Ok(true)
    }

    fn commit_block(&mut self, id: BlockId, updated: Block) -> bool {
        match self.blocks_by_id.get_mut(&id) {
            Some(slot) if *slot != updated => {
                *slot = updated;
                trace!(block = %id, "updated block");
                true
            }
            _ => false,
        }
    }

    /// Unlist `id` from every page other than `keep`
    fn detach(&mut self, id: BlockId, keep: PageId) {
        for (page_id, order) in self.block_ids_by_page.iter_mut() {
            if *page_id != keep {
                order.retain(|existing| *existing != id);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Pages
    // ---------------------------------------------------------------------

    /// Replace the page order and merge the records. Repeated ids keep their
    /// first position.
    pub fn upsert_pages(&mut self, pages: Vec<Page>) {
        let mut order = Vec::with_capacity(pages.len());
        for page in pages {
            if !order.contains(&page.id) {
                order.push(page.id);
            }
            self.pages_by_id.insert(page.id, page);
        }

        self.pages_by_id.retain(|id, _| order.contains(id));
        debug!(pages = order.len(), "upserted pages");
        self.page_ids = order;
    }

    pub fn upsert_page(&mut self, page: Page) {
        if !self.page_ids.contains(&page.id) {
            self.page_ids.push(page.id);
        }
        trace!(page = %page.id, "upserted page");
        self.pages_by_id.insert(page.id, page);
    }

    /// Apply `updater` to a page record. The page id cannot change.
    pub fn update_page<F>(&mut self, id: PageId, updater: F) -> bool
    where
        F: FnOnce(&Page) -> Page,
    {
        let Some(previous) = self.pages_by_id.get(&id) else {
            return false;
        };

        let mut updated = updater(previous);
        updated.id = id;
        if updated == *previous {
            return false;
        }

        self.pages_by_id.insert(id, updated);
        trace!(page = %id, "updated page");
        true
    }

    /// Overwrite an existing page record, returning the previous value
    pub fn replace_page(&mut self, page: Page) -> Option<Page> {
        let slot = self.pages_by_id.get_mut(&page.id)?;
        Some(std::mem::replace(slot, page))
    }

    /// Move `source_id` to the position `target_id` holds before the move
    pub fn reorder_page(&mut self, source_id: PageId, target_id: PageId) -> bool {
        move_within(&mut self.page_ids, source_id, target_id)
    }

    /// Set the page order. `ids` must be a permutation of the current list.
    pub fn set_page_order(&mut self, ids: &[PageId]) -> StoreResult<bool> {
        if !is_permutation(&self.page_ids, ids) {
            return Err(StoreError::NotAPagePermutation);
        }
        if self.page_ids.as_slice() == ids {
            return Ok(false);
        }

        self.page_ids = ids.to_vec();
        Ok(true)
    }

    /// Drop a page's blocks and ordering. The page record stays listed.
    pub fn unload_page(&mut self, page_id: PageId) -> bool {
        let Some(order) = self.block_ids_by_page.remove(&page_id) else {
            return false;
        };
        for id in &order {
            self.blocks_by_id.remove(id);
        }

        debug!(page = %page_id, blocks = order.len(), "unloaded page");
        true
    }

    /// Load a fetched page together with its blocks
    pub fn hydrate(&mut self, document: PageDocument) -> StoreResult<()> {
        let PageDocument { page, blocks } = document;
        let page_id = page.id;

        self.upsert_blocks(page_id, blocks)?;
        self.upsert_page(page);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ---------------------------------------------------------------------
    // Selectors
    // ---------------------------------------------------------------------

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks_by_id.get(&id)
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages_by_id.get(&id)
    }

    /// Page records in page order
    pub fn pages(&self) -> Vec<&Page> {
        self.page_ids
            .iter()
            .filter_map(|id| self.pages_by_id.get(id))
            .collect()
    }

    pub fn page_ids(&self) -> &[PageId] {
        &self.page_ids
    }

    /// Whether the page's block list is loaded
    pub fn has_page_blocks(&self, page_id: PageId) -> bool {
        self.block_ids_by_page.contains_key(&page_id)
    }

    pub fn page_block_ids(&self, page_id: PageId) -> &[BlockId] {
        self.block_ids_by_page
            .get(&page_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Block records of a page in render order
    pub fn page_blocks(&self, page_id: PageId) -> Vec<&Block> {
        self.page_block_ids(page_id)
            .iter()
            .filter_map(|id| self.blocks_by_id.get(id))
            .collect()
    }

    pub fn block_index(&self, page_id: PageId, id: BlockId) -> Option<usize> {
        self.page_block_ids(page_id)
            .iter()
            .position(|existing| *existing == id)
    }

    pub fn page_of_block(&self, id: BlockId) -> Option<PageId> {
        self.block_ids_by_page
            .iter()
            .find(|(_, order)| order.contains(&id))
            .map(|(page_id, _)| *page_id)
    }

    pub fn block_count(&self) -> usize {
        self.blocks_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks_by_id.is_empty() && self.pages_by_id.is_empty() && self.block_ids_by_page.is_empty()
    }
}

/// Single-element move: remove `source` and reinsert it at the index
/// `target` had before the removal
pub(crate) fn move_within<T: PartialEq + Copy>(order: &mut Vec<T>, source: T, target: T) -> bool {
    if source == target {
        return false;
    }
    let (Some(from), Some(to)) = (
        order.iter().position(|id| *id == source),
        order.iter().position(|id| *id == target),
    ) else {
        return false;
    };

    let item = order.remove(from);
    order.insert(to, item);
    true
}

pub(crate) fn is_permutation<T: Eq + std::hash::Hash + Copy>(current: &[T], next: &[T]) -> bool {
    if current.len() != next.len() {
        return false;
    }
    let current: HashSet<T> = current.iter().copied().collect();
    let next_set: HashSet<T> = next.iter().copied().collect();
    next_set.len() == next.len() && current == next_set
}
