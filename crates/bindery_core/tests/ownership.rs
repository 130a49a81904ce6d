use bindery_core::db::open_db_in_memory;
use bindery_core::{
    EntityId, EntityKind, NotebookService, PageService, SectionService, ServiceError,
};
use rusqlite::Connection;

const OWNER: &str = "acct-owner";
const INTRUDER: &str = "acct-intruder";

fn seed_page(conn: &mut Connection) -> (EntityId, EntityId) {
    let notebook = NotebookService::new(conn)
        .create(OWNER, "notebook", None)
        .unwrap();
    let page = PageService::new(conn)
        .create(OWNER, notebook.notebook_id, "page", None)
        .unwrap();
    (notebook.notebook_id, page.page_id)
}

#[test]
fn missing_notebook_reports_not_found_before_ownership() {
    let mut conn = open_db_in_memory().unwrap();
    NotebookService::new(&mut conn)
        .create(OWNER, "notebook", None)
        .unwrap();

    let err = NotebookService::new(&mut conn).get(INTRUDER, 999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Notebook, 999)));
}

#[test]
fn foreign_notebook_reports_forbidden_not_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = NotebookService::new(&mut conn)
        .create(OWNER, "notebook", None)
        .unwrap();

    let err = NotebookService::new(&mut conn)
        .get(INTRUDER, notebook.notebook_id)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
}

#[test]
fn foreign_notebook_cannot_be_renamed_or_deleted() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = NotebookService::new(&mut conn)
        .create(OWNER, "notebook", None)
        .unwrap();

    let err = NotebookService::new(&mut conn)
        .update(INTRUDER, notebook.notebook_id, "stolen", 1)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));

    let err = NotebookService::new(&mut conn)
        .delete(INTRUDER, notebook.notebook_id)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));

    // Untouched.
    let survivor = NotebookService::new(&mut conn)
        .get(OWNER, notebook.notebook_id)
        .unwrap();
    assert_eq!(survivor.title, "notebook");
}

#[test]
fn foreign_page_reports_forbidden() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, page_id) = seed_page(&mut conn);

    let err = PageService::new(&mut conn).get(INTRUDER, page_id).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
}

#[test]
fn listing_pages_of_a_foreign_notebook_is_forbidden() {
    let mut conn = open_db_in_memory().unwrap();
    let (notebook_id, _) = seed_page(&mut conn);

    let err = PageService::new(&mut conn)
        .list(INTRUDER, notebook_id)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
}

#[test]
fn moving_a_page_into_a_missing_notebook_reports_the_notebook() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, page_id) = seed_page(&mut conn);

    let err = PageService::new(&mut conn)
        .update(OWNER, page_id, 999, "page", 1)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Notebook, 999)));
}

#[test]
fn moving_a_page_into_a_foreign_notebook_is_forbidden() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, page_id) = seed_page(&mut conn);
    let foreign = NotebookService::new(&mut conn)
        .create(INTRUDER, "theirs", None)
        .unwrap();

    let err = PageService::new(&mut conn)
        .update(OWNER, page_id, foreign.notebook_id, "page", 1)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));

    // The page stays where it was.
    let page = PageService::new(&mut conn).get(OWNER, page_id).unwrap();
    assert_ne!(page.notebook_id, foreign.notebook_id);
}

#[test]
fn foreign_section_reports_forbidden_through_the_containment_chain() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, page_id) = seed_page(&mut conn);
    let section = SectionService::new(&mut conn)
        .create(OWNER, page_id, "body")
        .unwrap();

    let err = SectionService::new(&mut conn)
        .get(INTRUDER, section.section_id)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));

    let err = SectionService::new(&mut conn)
        .trash(INTRUDER, section.section_id)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
}

#[test]
fn missing_section_reports_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    seed_page(&mut conn);

    let err = SectionService::new(&mut conn).get(OWNER, 42).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Section, 42)));
}
