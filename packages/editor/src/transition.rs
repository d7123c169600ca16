use pagecraft_model::{Block, BlockId, Page, PageId};
use serde::{Deserialize, Serialize};

/// State change produced by running a command forwards or backwards.
///
/// Handed to the persistence layer, which mirrors it to the server and calls
/// the command's inverse if the server rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Transition {
    BlockUpdated {
        block: Block,
    },
    BlockAdded {
        page_id: PageId,
        block: Block,
        index: usize,
    },
    BlockRemoved {
        page_id: PageId,
        block_id: BlockId,
    },
    BlocksReordered {
        page_id: PageId,
        order: Vec<BlockId>,
    },
    PageUpdated {
        page: Page,
    },
    PagesReordered {
        order: Vec<PageId>,
    },
    /// Nothing to do: a target was missing or already in the wanted state
    Unchanged,
}

impl Transition {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Transition::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let transition = Transition::BlockRemoved {
            page_id: PageId(1),
            block_id: BlockId(2),
        };
        let value = serde_json::to_value(&transition).unwrap();

        assert_eq!(value["kind"], "block-removed");
        assert_eq!(value["pageId"], 1);
        assert_eq!(value["blockId"], 2);
    }

    #[test]
    fn test_block_keeps_its_own_type_tag() {
        let transition = Transition::BlockUpdated {
            block: Block::text("Hi").with_id(3u64),
        };
        let value = serde_json::to_value(&transition).unwrap();

        assert_eq!(value["kind"], "block-updated");
        assert_eq!(value["block"]["type"], "Text");

        let back: Transition = serde_json::from_value(value).unwrap();
        assert_eq!(back, transition);
    }
}
