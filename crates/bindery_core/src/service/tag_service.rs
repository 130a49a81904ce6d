use crate::model::record::{EntityId, EntityKind, Tag};
use crate::repo::tag_repo::TagRepo;
use crate::service::{check_owner, ServiceError, ServiceResult};
use rusqlite::{Connection, TransactionBehavior};

pub struct TagService<'c> {
    conn: &'c mut Connection,
}

impl<'c> TagService<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    pub fn list(&mut self, account_id: &str) -> ServiceResult<Vec<Tag>> {
        let tx = self.conn.transaction()?;
        let tags = TagRepo::new(&tx).list_owned_by(account_id)?;
        tx.commit()?;
        Ok(tags)
    }

    pub fn get(&mut self, account_id: &str, tag_id: EntityId) -> ServiceResult<Tag> {
        let tx = self.conn.transaction()?;
        let tag = TagRepo::new(&tx)
            .get(tag_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Tag, tag_id))?;
        check_owner(Some(tag.account_id.clone()), account_id)?;
        tx.commit()?;
        Ok(tag)
    }

    pub fn create(&mut self, account_id: &str, name: &str) -> ServiceResult<Tag> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let tag = TagRepo::new(&tx).insert(account_id, name)?;
        tx.commit()?;
        log::info!("event=tag_create module=service status=ok tag_id={}", tag.tag_id);
        Ok(tag)
    }

    pub fn update(&mut self, account_id: &str, tag_id: EntityId, name: &str) -> ServiceResult<Tag> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let updated = {
            let repo = TagRepo::new(&tx);
            let target = repo
                .get(tag_id)?
                .ok_or(ServiceError::NotFound(EntityKind::Tag, tag_id))?;
            check_owner(Some(target.account_id), account_id)?;
            repo.update(tag_id, name)?
        };
        tx.commit()?;
        Ok(updated)
    }

    /// Deletes the tag; the schema cascade removes its section associations.
    pub fn delete(&mut self, account_id: &str, tag_id: EntityId) -> ServiceResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let repo = TagRepo::new(&tx);
            let target = repo
                .get(tag_id)?
                .ok_or(ServiceError::NotFound(EntityKind::Tag, tag_id))?;
            check_owner(Some(target.account_id), account_id)?;
            repo.delete(tag_id)?;
        }
        tx.commit()?;
        log::info!("event=tag_delete module=service status=ok tag_id={tag_id}");
        Ok(())
    }
}
