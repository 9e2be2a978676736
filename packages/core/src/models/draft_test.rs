//! Tests for the Draft aggregate
//!
//! Covers the block store operations, the publish gate truth table, and
//! snapshot assembly.

#[cfg(test)]
mod tests {
    use crate::models::{Block, BlockKind, Draft};
    use crate::operations::{BlockOperationError, MoveDirection};
    use chrono::NaiveDate;

    fn draft_with_blocks(kinds: &[BlockKind]) -> Draft {
        let mut draft = Draft::new();
        for kind in kinds {
            draft.add_block(*kind);
        }
        draft
    }

    fn block_ids(draft: &Draft) -> Vec<String> {
        draft
            .blocks()
            .iter()
            .map(|block| block.id().to_string())
            .collect()
    }

    #[test]
    fn test_add_block_grows_sequence_with_distinct_ids() {
        let mut draft = Draft::new();
        for i in 0..5 {
            draft.add_block(BlockKind::Text);
            assert_eq!(draft.blocks().len(), i + 1);
        }

        let mut ids = block_ids(&draft);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_add_block_appends_at_end() {
        let mut draft = draft_with_blocks(&[BlockKind::Text, BlockKind::Quote]);
        let new_id = draft.add_block(BlockKind::Image).id().to_string();

        assert_eq!(draft.blocks()[2].id(), new_id);
        assert_eq!(draft.blocks()[2].kind(), BlockKind::Image);
    }

    #[test]
    fn test_update_block_replaces_in_place() {
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        let mut edited = draft.block(0).unwrap().clone();
        edited.set_content("hi").unwrap();

        draft.update_block(0, edited).unwrap();

        match &draft.blocks()[0] {
            Block::Text { content, .. } => assert_eq!(content, "hi"),
            _ => panic!("expected text block"),
        }
    }

    #[test]
    fn test_update_block_rejects_out_of_range() {
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        let replacement = Block::new(BlockKind::Text);

        assert_eq!(
            draft.update_block(2, replacement),
            Err(BlockOperationError::IndexOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_update_block_rejects_kind_change() {
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        let replacement = Block::new(BlockKind::Image);

        assert!(matches!(
            draft.update_block(0, replacement),
            Err(BlockOperationError::KindMismatch { .. })
        ));
        // The resident block is untouched
        assert_eq!(draft.blocks()[0].kind(), BlockKind::Text);
    }

    #[test]
    fn test_remove_block_shrinks_and_preserves_order() {
        let mut draft =
            draft_with_blocks(&[BlockKind::Text, BlockKind::Image, BlockKind::Quote]);
        let ids = block_ids(&draft);

        let removed = draft.remove_block(1).unwrap();

        assert_eq!(removed.id(), ids[1]);
        assert_eq!(draft.blocks().len(), 2);
        assert_eq!(block_ids(&draft), vec![ids[0].clone(), ids[2].clone()]);
    }

    #[test]
    fn test_remove_block_rejects_out_of_range() {
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        assert_eq!(
            draft.remove_block(1).unwrap_err(),
            BlockOperationError::IndexOutOfRange { index: 1, len: 1 }
        );
    }

    #[test]
    fn test_move_block_swaps_adjacent() {
        let mut draft =
            draft_with_blocks(&[BlockKind::Text, BlockKind::Image, BlockKind::Quote]);
        let ids = block_ids(&draft);

        draft.move_block(1, MoveDirection::Up).unwrap();
        assert_eq!(
            block_ids(&draft),
            vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]
        );

        draft.move_block(1, MoveDirection::Down).unwrap();
        assert_eq!(block_ids(&draft), ids);
    }

    #[test]
    fn test_move_up_then_down_is_involution() {
        // move_block(i, Up) followed by move_block(i-1, Down) restores order
        for i in 1..3 {
            let mut draft =
                draft_with_blocks(&[BlockKind::Text, BlockKind::Image, BlockKind::Quote]);
            let before = block_ids(&draft);

            draft.move_block(i, MoveDirection::Up).unwrap();
            draft.move_block(i - 1, MoveDirection::Down).unwrap();

            assert_eq!(block_ids(&draft), before, "order changed for i = {}", i);
        }
    }

    #[test]
    fn test_move_block_boundaries_are_no_ops() {
        let mut draft =
            draft_with_blocks(&[BlockKind::Text, BlockKind::Image, BlockKind::Quote]);
        let before = block_ids(&draft);

        draft.move_block(0, MoveDirection::Up).unwrap();
        assert_eq!(block_ids(&draft), before);

        draft.move_block(2, MoveDirection::Down).unwrap();
        assert_eq!(block_ids(&draft), before);
    }

    #[test]
    fn test_move_block_rejects_out_of_range() {
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        assert_eq!(
            draft.move_block(1, MoveDirection::Up).unwrap_err(),
            BlockOperationError::IndexOutOfRange { index: 1, len: 1 }
        );

        let mut empty = Draft::new();
        assert_eq!(
            empty.move_block(0, MoveDirection::Down).unwrap_err(),
            BlockOperationError::IndexOutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn test_publish_gate_truth_table() {
        // Empty title + 1 block -> false
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        assert!(!draft.can_publish());

        // Title + 0 blocks -> false
        let mut titled = Draft::new();
        titled.title = "Hello".to_string();
        assert!(!titled.can_publish());

        // Whitespace-only title + 1 block -> false
        draft.title = "   ".to_string();
        assert!(!draft.can_publish());

        // Title + 1 block -> true
        draft.title = "Hello".to_string();
        assert!(draft.can_publish());
    }

    #[test]
    fn test_gate_ignores_block_completeness() {
        let mut draft = draft_with_blocks(&[BlockKind::Image]);
        draft.title = "Hello".to_string();

        // The image block's src is still empty, but the gate stays open
        assert!(draft.can_publish());
        assert_eq!(draft.incomplete_blocks(), vec![0]);
    }

    #[test]
    fn test_incomplete_blocks_clears_after_upload_resolves() {
        let mut draft = draft_with_blocks(&[BlockKind::Text, BlockKind::Image]);
        assert_eq!(draft.incomplete_blocks(), vec![1]);

        draft
            .block_mut(1)
            .unwrap()
            .set_src("https://cdn.example/a.jpg")
            .unwrap();
        assert!(draft.incomplete_blocks().is_empty());
    }

    #[test]
    fn test_tags_deduplicate_on_insert() {
        let mut draft = Draft::new();
        draft.add_tag("travel");
        draft.add_tag("film");
        draft.add_tag("travel");
        draft.add_tag("");

        assert_eq!(draft.tags(), ["travel", "film"]);

        draft.remove_tag("travel");
        assert_eq!(draft.tags(), ["film"]);
    }

    #[test]
    fn test_snapshot_carries_fields_and_block_order() {
        let mut draft = draft_with_blocks(&[BlockKind::Text, BlockKind::Image]);
        draft.title = "My Day".to_string();
        draft.subtitle = Some("an afternoon walk".to_string());
        draft.date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        draft.location = Some("Kyoto".to_string());
        draft.add_tag("travel");
        let ids = block_ids(&draft);

        let snapshot = draft.snapshot();

        assert!(!snapshot.id.is_empty());
        assert_eq!(snapshot.title, "My Day");
        assert_eq!(snapshot.date, "2024.03.09");
        assert_eq!(snapshot.tags, ["travel"]);
        assert_eq!(snapshot.content.len(), 2);
        assert_eq!(snapshot.content[0].id(), ids[0]);
        assert_eq!(snapshot.content[1].id(), ids[1]);

        // The live draft is untouched by snapshotting
        assert_eq!(draft.blocks().len(), 2);
    }

    #[test]
    fn test_snapshot_ids_are_fresh_per_publish() {
        let mut draft = draft_with_blocks(&[BlockKind::Text]);
        draft.title = "Hello".to_string();

        assert_ne!(draft.snapshot().id, draft.snapshot().id);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut draft = draft_with_blocks(&[
            BlockKind::Text,
            BlockKind::Image,
            BlockKind::Gallery,
            BlockKind::Quote,
        ]);
        draft.title = "Round trip".to_string();
        draft.add_tag("serde");
        draft
            .block_mut(2)
            .unwrap()
            .push_image("https://cdn.example/g1.jpg")
            .unwrap();

        let snapshot = draft.snapshot();
        let raw = serde_json::to_string(&snapshot).unwrap();
        let back: crate::models::SnippetSnapshot = serde_json::from_str(&raw).unwrap();

        assert_eq!(snapshot, back);
    }
}
