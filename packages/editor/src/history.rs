//! # Undo/Redo History
//!
//! Per-page command history with a cursor.
//!
//! ## Design
//!
//! - Each page has its own ordered command list; the cursor points just past
//!   the last executed command, so everything after it is the redo future
//! - Executing from a non-tip position discards the future
//! - The list is capped (50 by default); the oldest command is evicted first
//! - One flag guards execute/undo/redo: a call made while a command is
//!   running is rejected and returns `None`
//!
//! The manager takes `&self` so a running command may hold a shared handle to
//! it. Commands are cloned out of the list before they run; no borrow of the
//! history is held while a command touches the store.
//!
//! ## Example
//!
//! ```rust,ignore
//! let history = HistoryManager::new(&EditorConfig::default());
//! history.execute(command, page_id, &mut store);
//! history.undo(page_id, &mut store);
//! history.redo(page_id, &mut store);
//! ```

use crate::command::Command;
use crate::config::EditorConfig;
use crate::store::DocumentStore;
use crate::transition::Transition;
use pagecraft_model::PageId;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Default)]
struct PageHistory {
    commands: Vec<Rc<Command>>,
    /// Number of executed commands; `cursor - 1` is the current index
    cursor: usize,
}

/// Resets the executing flag when the running command returns or unwinds
struct ExecutionGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[derive(Debug)]
pub struct HistoryManager {
    /// Maximum commands per page (0 = unlimited)
    limit: usize,
    pages: RefCell<HashMap<PageId, PageHistory>>,
    executing: Cell<bool>,
}

impl HistoryManager {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_limit(config.history_limit)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            pages: RefCell::new(HashMap::new()),
            executing: Cell::new(false),
        }
    }

    fn enter(&self, action: &str) -> Option<ExecutionGuard<'_>> {
        if self.executing.get() {
            warn!(action, "rejected: another command is executing");
            return None;
        }
        self.executing.set(true);
        Some(ExecutionGuard {
            flag: &self.executing,
        })
    }

    /// Run `command` and record it in `page_id`'s history.
    ///
    /// Returns `None` if another command is currently executing.
    #[instrument(skip(self, command, store), fields(kind = %command.kind()))]
    pub fn execute(&self, command: Command, page_id: PageId, store: &mut DocumentStore) -> Option<Transition> {
        let _guard = self.enter("execute")?;

        {
            let mut pages = self.pages.borrow_mut();
            let history = pages.entry(page_id).or_default();
            let cursor = history.cursor;
            if cursor < history.commands.len() {
                debug!(discarded = history.commands.len() - cursor, "discarding redo future");
                history.commands.truncate(cursor);
            }
        }

        let command = Rc::new(command);
        let transition = command.execute(store);

        let mut pages = self.pages.borrow_mut();
        let history = pages.entry(page_id).or_default();
        history.commands.push(command);
        history.cursor = history.commands.len();

        if self.limit > 0 && history.commands.len() > self.limit {
            let evicted = history.commands.remove(0);
            history.cursor -= 1;
            debug!(evicted = evicted.id(), "history limit reached");
        }

        Some(transition)
    }

    /// Undo the command at the cursor
    #[instrument(skip(self, store))]
    pub fn undo(&self, page_id: PageId, store: &mut DocumentStore) -> Option<Transition> {
        if !self.can_undo(page_id) {
            return None;
        }
        let _guard = self.enter("undo")?;

        let command = {
            let pages = self.pages.borrow();
            let history = pages.get(&page_id)?;
            Rc::clone(history.commands.get(history.cursor.checked_sub(1)?)?)
        };

        let transition = command.undo(store);

        if let Some(history) = self.pages.borrow_mut().get_mut(&page_id) {
            history.cursor = history.cursor.saturating_sub(1);
        }
        debug!(id = command.id(), "undone");
        Some(transition)
    }

    /// Re-execute the first command of the redo future
    #[instrument(skip(self, store))]
    pub fn redo(&self, page_id: PageId, store: &mut DocumentStore) -> Option<Transition> {
        if !self.can_redo(page_id) {
            return None;
        }
        let _guard = self.enter("redo")?;

        let command = {
            let mut pages = self.pages.borrow_mut();
            let history = pages.get_mut(&page_id)?;
            let command = Rc::clone(history.commands.get(history.cursor)?);
            history.cursor += 1;
            command
        };

        debug!(id = command.id(), "redo");
        Some(command.execute(store))
    }

    /// False while a command is executing
    pub fn can_undo(&self, page_id: PageId) -> bool {
        !self.executing.get() && self.undo_levels(page_id) > 0
    }

    /// False while a command is executing
    pub fn can_redo(&self, page_id: PageId) -> bool {
        !self.executing.get() && self.redo_levels(page_id) > 0
    }

    pub fn is_executing(&self) -> bool {
        self.executing.get()
    }

    pub fn clear(&self) {
        self.pages.borrow_mut().clear();
    }

    pub fn clear_page(&self, page_id: PageId) {
        self.pages.borrow_mut().remove(&page_id);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of commands in the page's history
    pub fn len(&self, page_id: PageId) -> usize {
        self.with_page(page_id, |history| history.commands.len())
    }

    /// Index of the last executed command, `None` when nothing is executed
    pub fn current_index(&self, page_id: PageId) -> Option<usize> {
        self.with_page(page_id, |history| history.cursor.checked_sub(1))
    }

    pub fn undo_levels(&self, page_id: PageId) -> usize {
        self.with_page(page_id, |history| history.cursor)
    }

    pub fn redo_levels(&self, page_id: PageId) -> usize {
        self.with_page(page_id, |history| history.commands.len() - history.cursor)
    }

    /// Description of the command the next undo would revert
    pub fn undo_description(&self, page_id: PageId) -> Option<String> {
        self.with_page(page_id, |history| {
            let index = history.cursor.checked_sub(1)?;
            history.commands.get(index)?.description().map(str::to_string)
        })
    }

    /// Description of the command the next redo would apply
    pub fn redo_description(&self, page_id: PageId) -> Option<String> {
        self.with_page(page_id, |history| {
            history
                .commands
                .get(history.cursor)?
                .description()
                .map(str::to_string)
        })
    }

    /// Ids of the page's commands, oldest first
    pub fn command_ids(&self, page_id: PageId) -> Vec<String> {
        self.with_page(page_id, |history| {
            history
                .commands
                .iter()
                .map(|command| command.id().to_string())
                .collect()
        })
    }

    fn with_page<T: Default>(&self, page_id: PageId, f: impl FnOnce(&PageHistory) -> T) -> T {
        self.pages.borrow().get(&page_id).map(f).unwrap_or_default()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
