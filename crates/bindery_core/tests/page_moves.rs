use bindery_core::db::open_db_in_memory;
use bindery_core::{EntityId, NotebookService, PageService};
use rusqlite::Connection;
use std::collections::HashSet;

const ACCOUNT: &str = "acct-1";

fn seed_notebook(conn: &mut Connection, title: &str) -> EntityId {
    NotebookService::new(conn)
        .create(ACCOUNT, title, None)
        .unwrap()
        .notebook_id
}

fn page_titles(conn: &mut Connection, notebook_id: EntityId) -> Vec<String> {
    PageService::new(conn)
        .list(ACCOUNT, notebook_id)
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect()
}

fn assert_orders_unique(conn: &mut Connection, notebook_id: EntityId) {
    let pages = PageService::new(conn).list(ACCOUNT, notebook_id).unwrap();
    let orders: HashSet<i64> = pages.iter().map(|p| p.sort_order).collect();
    assert_eq!(orders.len(), pages.len(), "duplicate sort_order present");
}

#[test]
fn pages_are_ordered_per_notebook() {
    let mut conn = open_db_in_memory().unwrap();
    let left = seed_notebook(&mut conn, "left");
    let right = seed_notebook(&mut conn, "right");

    let a = PageService::new(&mut conn)
        .create(ACCOUNT, left, "a", None)
        .unwrap();
    let b = PageService::new(&mut conn)
        .create(ACCOUNT, right, "b", None)
        .unwrap();

    // Each notebook starts its own 1-based sequence.
    assert_eq!(a.sort_order, 1);
    assert_eq!(b.sort_order, 1);
}

#[test]
fn inserting_a_page_into_an_occupied_slot_shifts_later_pages() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = seed_notebook(&mut conn, "notebook");

    for title in ["a", "b", "c"] {
        PageService::new(&mut conn)
            .create(ACCOUNT, notebook, title, None)
            .unwrap();
    }
    PageService::new(&mut conn)
        .create(ACCOUNT, notebook, "d", Some(2))
        .unwrap();

    assert_eq!(page_titles(&mut conn, notebook), vec!["a", "d", "b", "c"]);
    assert_orders_unique(&mut conn, notebook);
}

#[test]
fn reordering_within_a_notebook_preserves_relative_order() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = seed_notebook(&mut conn, "notebook");

    let mut ids = Vec::new();
    for title in ["a", "b", "c", "d"] {
        ids.push(
            PageService::new(&mut conn)
                .create(ACCOUNT, notebook, title, None)
                .unwrap()
                .page_id,
        );
    }

    PageService::new(&mut conn)
        .update(ACCOUNT, ids[3], notebook, "d", 1)
        .unwrap();

    assert_eq!(page_titles(&mut conn, notebook), vec!["d", "a", "b", "c"]);
    assert_orders_unique(&mut conn, notebook);
}

#[test]
fn moving_a_page_across_notebooks_opens_a_slot_in_the_destination() {
    let mut conn = open_db_in_memory().unwrap();
    let source = seed_notebook(&mut conn, "source");
    let dest = seed_notebook(&mut conn, "dest");

    let moved_id = PageService::new(&mut conn)
        .create(ACCOUNT, source, "mover", None)
        .unwrap()
        .page_id;
    for title in ["x", "y", "z"] {
        PageService::new(&mut conn)
            .create(ACCOUNT, dest, title, None)
            .unwrap();
    }

    let moved = PageService::new(&mut conn)
        .update(ACCOUNT, moved_id, dest, "mover", 2)
        .unwrap();

    assert_eq!(moved.notebook_id, dest);
    assert_eq!(moved.sort_order, 2);
    assert_eq!(page_titles(&mut conn, dest), vec!["x", "mover", "y", "z"]);
    assert!(page_titles(&mut conn, source).is_empty());
    assert_orders_unique(&mut conn, dest);
}

#[test]
fn source_notebook_keeps_a_gap_after_a_move_out() {
    let mut conn = open_db_in_memory().unwrap();
    let source = seed_notebook(&mut conn, "source");
    let dest = seed_notebook(&mut conn, "dest");

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        ids.push(
            PageService::new(&mut conn)
                .create(ACCOUNT, source, title, None)
                .unwrap()
                .page_id,
        );
    }

    PageService::new(&mut conn)
        .update(ACCOUNT, ids[1], dest, "b", 1)
        .unwrap();

    let remaining: Vec<i64> = PageService::new(&mut conn)
        .list(ACCOUNT, source)
        .unwrap()
        .into_iter()
        .map(|p| p.sort_order)
        .collect();
    assert_eq!(remaining, vec![1, 3]);
}

#[test]
fn deleting_a_notebook_cascades_to_its_pages() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = seed_notebook(&mut conn, "doomed");
    PageService::new(&mut conn)
        .create(ACCOUNT, notebook, "page", None)
        .unwrap();

    NotebookService::new(&mut conn)
        .delete(ACCOUNT, notebook)
        .unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM pages;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
