use crate::model::record::{EntityId, EntityKind, Page};
use crate::repo::notebook_repo::NotebookRepo;
use crate::repo::page_repo::PageRepo;
use crate::service::{check_owner, ServiceError, ServiceResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};

pub struct PageService<'c> {
    conn: &'c mut Connection,
}

/// Confirms `notebook_id` exists and belongs to `account_id`.
fn gate_notebook(tx: &Transaction<'_>, account_id: &str, notebook_id: EntityId) -> ServiceResult<()> {
    let repo = NotebookRepo::new(tx);
    let owner = repo
        .owner_of(notebook_id)?
        .ok_or(ServiceError::NotFound(EntityKind::Notebook, notebook_id))?;
    check_owner(Some(owner), account_id)
}

impl<'c> PageService<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    pub fn list(&mut self, account_id: &str, notebook_id: EntityId) -> ServiceResult<Vec<Page>> {
        let tx = self.conn.transaction()?;
        gate_notebook(&tx, account_id, notebook_id)?;
        let pages = PageRepo::new(&tx).list_in(notebook_id)?;
        tx.commit()?;
        Ok(pages)
    }

    pub fn get(&mut self, account_id: &str, page_id: EntityId) -> ServiceResult<Page> {
        let tx = self.conn.transaction()?;
        let repo = PageRepo::new(&tx);
        let page = repo
            .get(page_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Page, page_id))?;
        let owner = repo.owner_of(page_id)?;
        check_owner(owner, account_id)?;
        drop(repo);
        tx.commit()?;
        Ok(page)
    }

    pub fn create(
        &mut self,
        account_id: &str,
        notebook_id: EntityId,
        title: &str,
        desired_order: Option<i64>,
    ) -> ServiceResult<Page> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_notebook(&tx, account_id, notebook_id)?;
        let page = PageRepo::new(&tx).insert(notebook_id, title, desired_order)?;
        tx.commit()?;
        log::info!(
            "event=page_create module=service status=ok page_id={} notebook_id={notebook_id}",
            page.page_id
        );
        Ok(page)
    }

    /// Retitles and moves a page. `notebook_id` is the destination; when it
    /// differs from the page's current notebook the destination is gated
    /// first, so a move into a missing or foreign notebook fails before the
    /// page itself is examined.
    pub fn update(
        &mut self,
        account_id: &str,
        page_id: EntityId,
        notebook_id: EntityId,
        title: &str,
        new_order: i64,
    ) -> ServiceResult<Page> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_notebook(&tx, account_id, notebook_id)?;
        let updated = {
            let repo = PageRepo::new(&tx);
            let target = repo
                .get(page_id)?
                .ok_or(ServiceError::NotFound(EntityKind::Page, page_id))?;
            let owner = repo.owner_of(page_id)?;
            check_owner(owner, account_id)?;
            repo.update(&target, notebook_id, title, new_order)?
        };
        tx.commit()?;
        Ok(updated)
    }

    pub fn delete(&mut self, account_id: &str, page_id: EntityId) -> ServiceResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let repo = PageRepo::new(&tx);
            repo.get(page_id)?
                .ok_or(ServiceError::NotFound(EntityKind::Page, page_id))?;
            let owner = repo.owner_of(page_id)?;
            check_owner(owner, account_id)?;
            repo.delete(page_id)?;
        }
        tx.commit()?;
        log::info!("event=page_delete module=service status=ok page_id={page_id}");
        Ok(())
    }
}
