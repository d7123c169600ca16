//! Integration tests for editor crate

use pagecraft_editor::{
    Command, CommandKind, Editor, EditorConfig, HistoryManager, Transition, DEFAULT_HISTORY_LIMIT,
};
use pagecraft_model::{Block, BlockId, BlockType, PageDocument, PageId};
use pretty_assertions::assert_eq;
use serde_json::json;

const PAGE: PageId = PageId(10);

fn load_home() -> Editor {
    let source = r#"{
        "id": 10,
        "slug": "home",
        "name": "Home",
        "blocks": [
            { "id": 1, "type": "Text", "data": { "value": "Welcome" } },
            { "id": 2, "type": "Image", "data": { "url": "hero.png", "alt": "Hero" } },
            { "id": 3, "type": "Button", "data": { "text": "Sign up", "link": "/join" } }
        ]
    }"#;

    let mut editor = Editor::new(&EditorConfig::default());
    editor
        .hydrate(PageDocument::from_json(source).unwrap())
        .unwrap();
    editor
}

fn ids(values: &[u64]) -> Vec<BlockId> {
    values.iter().copied().map(BlockId).collect()
}

#[test]
fn test_editing_session() {
    let mut editor = load_home();
    let loaded = editor.store().clone();

    // Edit text
    editor
        .patch_block(BlockId(1), BlockType::Text, &json!({ "data": { "value": "Hello" } }))
        .unwrap()
        .unwrap();

    // Drag the button to the top
    editor.move_block(PAGE, BlockId(3), BlockId(1)).unwrap();
    assert_eq!(editor.store().page_block_ids(PAGE), ids(&[3, 1, 2]).as_slice());

    // Drop the image
    let transition = editor.remove_block(PAGE, BlockId(2)).unwrap();
    assert_eq!(
        transition,
        Transition::BlockRemoved {
            page_id: PAGE,
            block_id: BlockId(2)
        }
    );

    assert_eq!(editor.history().len(PAGE), 3);
    assert_eq!(
        editor.history().undo_description(PAGE).as_deref(),
        Some("Remove block")
    );

    // Undo everything
    while editor.can_undo(PAGE) {
        editor.undo(PAGE).unwrap();
    }
    assert_eq!(editor.store(), &loaded);

    // Redo the text edit only
    editor.redo(PAGE).unwrap();
    assert_eq!(
        editor.store().block(BlockId(1)),
        Some(&Block::text("Hello").with_id(1u64))
    );
    assert!(editor.can_redo(PAGE));
}

#[test]
fn test_can_undo_follows_the_cursor() {
    let mut editor = load_home();
    assert!(!editor.can_undo(PAGE));
    assert!(!editor.can_redo(PAGE));

    editor.move_block_down(PAGE, BlockId(1)).unwrap();
    assert!(editor.can_undo(PAGE));
    assert!(!editor.can_redo(PAGE));

    editor.undo(PAGE).unwrap();
    assert!(!editor.can_undo(PAGE));
    assert!(editor.can_redo(PAGE));

    // Nothing further to undo
    assert!(editor.undo(PAGE).is_none());
}

#[test]
fn test_new_command_discards_redo_future() {
    let mut editor = load_home();

    editor.move_block_down(PAGE, BlockId(1)).unwrap();
    editor.move_block_down(PAGE, BlockId(1)).unwrap();
    assert_eq!(editor.store().page_block_ids(PAGE), ids(&[2, 3, 1]).as_slice());

    editor.undo(PAGE).unwrap();
    editor.undo(PAGE).unwrap();
    assert_eq!(editor.history().redo_levels(PAGE), 2);

    editor.remove_block(PAGE, BlockId(3)).unwrap();
    assert!(!editor.can_redo(PAGE));
    assert_eq!(editor.history().len(PAGE), 1);
    assert!(editor.redo(PAGE).is_none());
}

#[test]
fn test_oldest_command_is_evicted_at_the_limit() {
    let mut editor = load_home();

    for i in 0..DEFAULT_HISTORY_LIMIT {
        editor
            .patch_block(BlockId(1), BlockType::Text, &json!({ "data": { "value": format!("v{}", i) } }))
            .unwrap()
            .unwrap();
    }
    let full = editor.history().command_ids(PAGE);
    assert_eq!(full.len(), DEFAULT_HISTORY_LIMIT);

    editor
        .patch_block(BlockId(1), BlockType::Text, &json!({ "data": { "value": "last" } }))
        .unwrap()
        .unwrap();

    let after = editor.history().command_ids(PAGE);
    assert_eq!(after.len(), DEFAULT_HISTORY_LIMIT);
    assert_eq!(&after[..DEFAULT_HISTORY_LIMIT - 1], &full[1..]);
    assert_eq!(editor.history().current_index(PAGE), Some(DEFAULT_HISTORY_LIMIT - 1));

    // Undo all the way back lands on the second edit, not the loaded text
    while editor.can_undo(PAGE) {
        editor.undo(PAGE).unwrap();
    }
    assert_eq!(
        editor.store().block(BlockId(1)),
        Some(&Block::text("v0").with_id(1u64))
    );
}

#[test]
fn test_add_at_front_then_remove_restores_order() {
    let mut editor = load_home();

    let transition = editor
        .add_block(PAGE, Block::text("Intro").with_id(4u64), 0)
        .unwrap()
        .unwrap();
    assert_eq!(
        transition,
        Transition::BlockAdded {
            page_id: PAGE,
            block: Block::text("Intro").with_id(4u64),
            index: 0
        }
    );

    editor.remove_block(PAGE, BlockId(4)).unwrap();
    assert_eq!(editor.store().page_block_ids(PAGE), ids(&[1, 2, 3]).as_slice());
    assert!(editor.store().block(BlockId(4)).is_none());
}

#[test]
fn test_histories_are_per_page() {
    let mut editor = load_home();
    editor
        .hydrate(PageDocument::new(
            pagecraft_model::Page::new(20u64),
            vec![Block::text("Other").with_id(7u64)],
        ))
        .unwrap();

    editor.remove_block(PageId(20), BlockId(7)).unwrap();
    assert!(editor.can_undo(PageId(20)));
    assert!(!editor.can_undo(PAGE));

    assert!(editor.undo(PAGE).is_none());
    assert!(editor.store().block(BlockId(7)).is_none());
}

#[test]
fn test_custom_command_through_history() {
    let history = HistoryManager::with_limit(3);
    let editor = load_home();
    let mut store = editor.store().clone();

    let command = Command::from_fns(
        CommandKind::ReorderBlocks,
        |store| {
            store.reorder_block(PAGE, BlockId(3), BlockId(1));
            Transition::BlocksReordered {
                page_id: PAGE,
                order: store.page_block_ids(PAGE).to_vec(),
            }
        },
        |store| {
            store.reorder_block(PAGE, BlockId(3), BlockId(2));
            Transition::BlocksReordered {
                page_id: PAGE,
                order: store.page_block_ids(PAGE).to_vec(),
            }
        },
    )
    .with_description("Button first");

    history.execute(command, PAGE, &mut store).unwrap();
    assert_eq!(store.page_block_ids(PAGE), ids(&[3, 1, 2]).as_slice());

    history.undo(PAGE, &mut store).unwrap();
    assert_eq!(&store, editor.store());

    // The editor's own history is untouched
    assert!(!editor.can_undo(PAGE));
}

#[test]
fn test_transition_wire_format() {
    let mut editor = load_home();
    let transition = editor.reorder_blocks(PAGE, ids(&[2, 3, 1])).unwrap().unwrap();

    assert_eq!(
        serde_json::to_value(&transition).unwrap(),
        json!({ "kind": "blocks-reordered", "pageId": 10, "order": [2, 3, 1] })
    );
}
