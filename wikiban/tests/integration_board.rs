//! End-to-end tests over the in-memory stores

use std::sync::Arc;

use wikiban::store::{MemoryTicketStore, MemoryWikiStore};
use wikiban::{
    BlockSyntax, Board, BoardContext, BoardError, Execute, FetchBoard, UpdateBoard,
};

const WIKI_PAGE: &str = "= Sprint board =\nProse above the block.\n{{{\n#!KanbanBoard\n{\n  \"columns\": [\n    { \"id\": 1, \"name\": \"New\", \"states\": [\"new\"], \"tickets\": [], \"wip\": 5 },\n    { \"id\": 2, \"name\": \"Done\", \"states\": [\"closed\"], \"tickets\": [100], \"wip\": 5 }\n  ]\n}\n}}}\nProse below the block.\n";

fn stores() -> (Arc<MemoryTicketStore>, Arc<MemoryWikiStore>) {
    let tickets = Arc::new(MemoryTicketStore::new());
    let wiki = Arc::new(MemoryWikiStore::with_page("SprintBoard", WIKI_PAGE));
    (tickets, wiki)
}

#[test_log::test(tokio::test)]
async fn test_misconfigured_ticket_moves_to_front_of_correct_column() {
    let (tickets, wiki) = stores();
    // Ticket 100 sits in Done but its authoritative status is "new"
    tickets.insert(100, "Misplaced", "new");
    let ctx = BoardContext::new(tickets, wiki.clone()).with_author("alice");

    let mut board = Board::load(&ctx, "SprintBoard", &[]).await.unwrap();
    let modified = board.reconcile_and_save(&ctx, true, false).await;

    assert!(modified);
    assert_eq!(board.column(1).unwrap().tickets, vec![100]);
    assert!(board.column(2).unwrap().tickets.is_empty());

    // The repair was persisted into the page, prose untouched
    let page = wiki.page("SprintBoard").unwrap();
    assert!(page.starts_with("= Sprint board =\nProse above the block.\n{{{\n#!KanbanBoard\n"));
    assert!(page.ends_with("}}}\nProse below the block.\n"));

    // A second pass over the saved state is a no-op
    let mut reloaded = Board::load(&ctx, "SprintBoard", &[]).await.unwrap();
    assert!(!reloaded.reconcile());
}

#[tokio::test]
async fn test_persistence_failure_still_returns_correct_board() {
    let (tickets, wiki) = stores();
    tickets.insert(100, "Misplaced", "new");
    wiki.fail_writes();
    let ctx = BoardContext::new(tickets, wiki.clone());

    let json = FetchBoard::new("SprintBoard")
        .save_changes(true)
        .execute(&ctx)
        .await
        .unwrap();

    // Response reflects the repaired board even though the write failed
    assert_eq!(json["columns"][0]["tickets"][0]["id"], 100);
    // The page kept its old, wrong configuration
    assert_eq!(wiki.page("SprintBoard").unwrap(), WIKI_PAGE);
}

#[tokio::test]
async fn test_legacy_array_form_reads_and_saves_as_object() {
    let page = "{{{#!KanbanBoard\n[\n  { \"id\": 1, \"name\": \"New\", \"states\": [\"new\"], \"tickets\": [5], \"wip\": 3 }\n]\n}}}\n";
    let tickets = Arc::new(MemoryTicketStore::new());
    tickets.insert(5, "Five", "new");
    let wiki = Arc::new(MemoryWikiStore::with_page("Legacy", page));
    let ctx = BoardContext::new(tickets, wiki.clone());

    // Force a save through an add so the page is rewritten
    let tickets_json = FetchBoard::new("Legacy").execute(&ctx).await.unwrap();
    assert_eq!(tickets_json["columns"][0]["tickets"][0]["summary"], "Five");

    UpdateBoard::new("Legacy", Vec::new())
        .execute(&ctx)
        .await
        .unwrap();

    let saved = wiki.page("Legacy").unwrap();
    let body = BlockSyntax::wiki_macro().extract(&saved).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["columns"][0]["tickets"][0], 5);
}

#[tokio::test]
async fn test_fenced_syntax_end_to_end() {
    let page = "# Notes\n\n```kanban\n{ \"columns\": [ { \"id\": 1, \"name\": \"New\", \"states\": [\"new\"], \"tickets\": [], \"wip\": 2 } ] }\n```\n";
    let tickets = Arc::new(MemoryTicketStore::new());
    tickets.insert(9, "Nine", "new");
    let wiki = Arc::new(MemoryWikiStore::with_page("Notes", page));
    let ctx = BoardContext::new(tickets, wiki.clone()).with_syntax(BlockSyntax::fenced("kanban"));

    FetchBoard::new("Notes").add(vec![9]).execute(&ctx).await.unwrap();

    let saved = wiki.page("Notes").unwrap();
    assert!(saved.starts_with("# Notes\n\n```kanban\n"));
    assert!(saved.ends_with("\n```\n"));
    let body = BlockSyntax::fenced("kanban").extract(&saved).unwrap();
    assert!(body.contains('9'));
}

#[tokio::test]
async fn test_unknown_display_fields_are_all_reported() {
    let page = "{{{#!KanbanBoard\n{\n  \"columns\": [ { \"id\": 1, \"name\": \"New\", \"states\": [\"new\"], \"tickets\": [], \"wip\": 1 } ],\n  \"fields\": [\"bogus_field\", \"status\", \"also_bogus\"]\n}\n}}}\n";
    let tickets = Arc::new(MemoryTicketStore::new());
    let wiki = Arc::new(MemoryWikiStore::with_page("Board", page));
    let ctx = BoardContext::new(tickets, wiki);

    let err = FetchBoard::new("Board").execute(&ctx).await.unwrap_err();
    match err {
        BoardError::Fields(wikiban_fields::FieldsError::UnknownFields { names }) => {
            assert_eq!(names, vec!["bogus_field".to_string(), "also_bogus".to_string()]);
        }
        other => panic!("expected field validation error, got: {other}"),
    }
}

#[tokio::test]
async fn test_board_without_columns_is_invalid() {
    let page = "{{{#!KanbanBoard\n{ \"columns\": [] }\n}}}\n";
    let tickets = Arc::new(MemoryTicketStore::new());
    let wiki = Arc::new(MemoryWikiStore::with_page("Board", page));
    let ctx = BoardContext::new(tickets, wiki);

    let err = FetchBoard::new("Board").execute(&ctx).await.unwrap_err();
    assert!(matches!(err, BoardError::InvalidData { .. }));
}

#[tokio::test]
async fn test_page_without_block_is_invalid() {
    let tickets = Arc::new(MemoryTicketStore::new());
    let wiki = Arc::new(MemoryWikiStore::with_page("Board", "just prose\nno block\n"));
    let ctx = BoardContext::new(tickets, wiki);

    let err = FetchBoard::new("Board").execute(&ctx).await.unwrap_err();
    assert!(matches!(err, BoardError::InvalidData { .. }));
}

#[tokio::test]
async fn test_deleted_ticket_self_heals_off_the_board() {
    let (tickets, wiki) = stores();
    // Ticket 100 is listed on the page but gone from the store
    tickets.insert(42, "Unrelated", "new");
    let ctx = BoardContext::new(tickets, wiki.clone());

    let json = FetchBoard::new("SprintBoard")
        .save_changes(true)
        .execute(&ctx)
        .await
        .unwrap();

    for column in json["columns"].as_array().unwrap() {
        assert!(column["tickets"].as_array().unwrap().is_empty());
    }
}
