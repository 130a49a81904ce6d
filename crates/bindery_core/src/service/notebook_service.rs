use crate::model::record::{EntityId, EntityKind, Notebook};
use crate::repo::notebook_repo::NotebookRepo;
use crate::service::{check_owner, ServiceError, ServiceResult};
use rusqlite::{Connection, TransactionBehavior};

pub struct NotebookService<'c> {
    conn: &'c mut Connection,
}

impl<'c> NotebookService<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    pub fn list(&mut self, account_id: &str) -> ServiceResult<Vec<Notebook>> {
        let tx = self.conn.transaction()?;
        let notebooks = NotebookRepo::new(&tx).list_owned_by(account_id)?;
        tx.commit()?;
        Ok(notebooks)
    }

    pub fn get(&mut self, account_id: &str, notebook_id: EntityId) -> ServiceResult<Notebook> {
        let tx = self.conn.transaction()?;
        let notebook = NotebookRepo::new(&tx)
            .get(notebook_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Notebook, notebook_id))?;
        check_owner(Some(notebook.account_id.clone()), account_id)?;
        tx.commit()?;
        Ok(notebook)
    }

    /// Creates a notebook for `account_id`. With `desired_order` set, the
    /// new notebook claims that slot and later siblings shift toward the
    /// tail; without it, the notebook lands at the tail.
    pub fn create(
        &mut self,
        account_id: &str,
        title: &str,
        desired_order: Option<i64>,
    ) -> ServiceResult<Notebook> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let notebook = NotebookRepo::new(&tx).insert(account_id, title, desired_order)?;
        tx.commit()?;
        log::info!(
            "event=notebook_create module=service status=ok notebook_id={}",
            notebook.notebook_id
        );
        Ok(notebook)
    }

    pub fn update(
        &mut self,
        account_id: &str,
        notebook_id: EntityId,
        title: &str,
        new_order: i64,
    ) -> ServiceResult<Notebook> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let updated = {
            let repo = NotebookRepo::new(&tx);
            let target = repo
                .get(notebook_id)?
                .ok_or(ServiceError::NotFound(EntityKind::Notebook, notebook_id))?;
            check_owner(Some(target.account_id.clone()), account_id)?;
            repo.update(&target, title, new_order)?
        };
        tx.commit()?;
        Ok(updated)
    }

    pub fn delete(&mut self, account_id: &str, notebook_id: EntityId) -> ServiceResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let repo = NotebookRepo::new(&tx);
            let target = repo
                .get(notebook_id)?
                .ok_or(ServiceError::NotFound(EntityKind::Notebook, notebook_id))?;
            check_owner(Some(target.account_id), account_id)?;
            repo.delete(notebook_id)?;
        }
        tx.commit()?;
        log::info!(
            "event=notebook_delete module=service status=ok notebook_id={notebook_id}"
        );
        Ok(())
    }
}
