use bindery_core::db::open_db_in_memory;
use bindery_core::{EntityId, NotebookService, PageService, SectionService};
use rusqlite::Connection;

const ACCOUNT: &str = "acct-1";

fn seed_page(conn: &mut Connection, notebook_title: &str, page_title: &str) -> EntityId {
    let notebook = NotebookService::new(conn)
        .create(ACCOUNT, notebook_title, None)
        .unwrap();
    PageService::new(conn)
        .create(ACCOUNT, notebook.notebook_id, page_title, None)
        .unwrap()
        .page_id
}

#[test]
fn trashed_sections_leave_the_page_listing() {
    let mut conn = open_db_in_memory().unwrap();
    let page_id = seed_page(&mut conn, "notebook", "page");

    let kept = SectionService::new(&mut conn)
        .create(ACCOUNT, page_id, "kept")
        .unwrap();
    let trashed = SectionService::new(&mut conn)
        .create(ACCOUNT, page_id, "trashed")
        .unwrap();

    SectionService::new(&mut conn)
        .trash(ACCOUNT, trashed.section_id)
        .unwrap();

    let listed = SectionService::new(&mut conn).list(ACCOUNT, page_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].section_id, kept.section_id);
}

#[test]
fn trashing_twice_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    let page_id = seed_page(&mut conn, "notebook", "page");
    let section = SectionService::new(&mut conn)
        .create(ACCOUNT, page_id, "body")
        .unwrap();

    let first = SectionService::new(&mut conn)
        .trash(ACCOUNT, section.section_id)
        .unwrap();
    let second = SectionService::new(&mut conn)
        .trash(ACCOUNT, section.section_id)
        .unwrap();

    assert!(first.is_trashed);
    assert!(second.is_trashed);
}

#[test]
fn untrash_restores_the_section_to_its_page() {
    let mut conn = open_db_in_memory().unwrap();
    let page_id = seed_page(&mut conn, "notebook", "page");
    let section = SectionService::new(&mut conn)
        .create(ACCOUNT, page_id, "body")
        .unwrap();

    SectionService::new(&mut conn)
        .trash(ACCOUNT, section.section_id)
        .unwrap();
    let restored = SectionService::new(&mut conn)
        .untrash(ACCOUNT, section.section_id)
        .unwrap();

    assert!(!restored.is_trashed);
    let listed = SectionService::new(&mut conn).list(ACCOUNT, page_id).unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn trash_listing_spans_all_pages_of_the_account() {
    let mut conn = open_db_in_memory().unwrap();
    let page_a = seed_page(&mut conn, "notebook a", "page a");
    let page_b = seed_page(&mut conn, "notebook b", "page b");
    let foreign_page = {
        let notebook = NotebookService::new(&mut conn)
            .create("acct-2", "other", None)
            .unwrap();
        PageService::new(&mut conn)
            .create("acct-2", notebook.notebook_id, "other page", None)
            .unwrap()
            .page_id
    };

    for (page_id, account) in [(page_a, ACCOUNT), (page_b, ACCOUNT), (foreign_page, "acct-2")] {
        let section = SectionService::new(&mut conn)
            .create(account, page_id, "doomed")
            .unwrap();
        SectionService::new(&mut conn)
            .trash(account, section.section_id)
            .unwrap();
    }

    let trash = SectionService::new(&mut conn).list_trash(ACCOUNT).unwrap();
    assert_eq!(trash.len(), 2);
    assert!(trash.iter().all(|s| s.is_trashed));
    assert!(trash.iter().any(|s| s.page_id == page_a));
    assert!(trash.iter().any(|s| s.page_id == page_b));
}

#[test]
fn update_can_move_a_section_to_another_page() {
    let mut conn = open_db_in_memory().unwrap();
    let page_a = seed_page(&mut conn, "notebook", "page a");
    let page_b = {
        let notebook = NotebookService::new(&mut conn)
            .list(ACCOUNT)
            .unwrap()
            .remove(0);
        PageService::new(&mut conn)
            .create(ACCOUNT, notebook.notebook_id, "page b", None)
            .unwrap()
            .page_id
    };

    let section = SectionService::new(&mut conn)
        .create(ACCOUNT, page_a, "wandering")
        .unwrap();
    let moved = SectionService::new(&mut conn)
        .update(ACCOUNT, section.section_id, page_b, "wandering v2")
        .unwrap();

    assert_eq!(moved.page_id, page_b);
    assert_eq!(moved.content, "wandering v2");
    assert!(SectionService::new(&mut conn)
        .list(ACCOUNT, page_a)
        .unwrap()
        .is_empty());
    assert_eq!(
        SectionService::new(&mut conn).list(ACCOUNT, page_b).unwrap().len(),
        1
    );
}

#[test]
fn delete_removes_the_section_outright() {
    let mut conn = open_db_in_memory().unwrap();
    let page_id = seed_page(&mut conn, "notebook", "page");
    let section = SectionService::new(&mut conn)
        .create(ACCOUNT, page_id, "body")
        .unwrap();

    SectionService::new(&mut conn)
        .delete(ACCOUNT, section.section_id)
        .unwrap();

    assert!(SectionService::new(&mut conn)
        .list(ACCOUNT, page_id)
        .unwrap()
        .is_empty());
    assert!(SectionService::new(&mut conn)
        .list_trash(ACCOUNT)
        .unwrap()
        .is_empty());
}
