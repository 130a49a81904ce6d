use crate::model::record::{EntityId, EntityKind, Section};
use crate::repo::page_repo::PageRepo;
use crate::repo::section_repo::SectionRepo;
use crate::service::{check_owner, ServiceError, ServiceResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};

pub struct SectionService<'c> {
    conn: &'c mut Connection,
}

fn gate_page(tx: &Transaction<'_>, account_id: &str, page_id: EntityId) -> ServiceResult<()> {
    let repo = PageRepo::new(tx);
    repo.get(page_id)?
        .ok_or(ServiceError::NotFound(EntityKind::Page, page_id))?;
    let owner = repo.owner_of(page_id)?;
    check_owner(owner, account_id)
}

fn gate_section(
    tx: &Transaction<'_>,
    account_id: &str,
    section_id: EntityId,
) -> ServiceResult<Section> {
    let repo = SectionRepo::new(tx);
    let section = repo
        .get(section_id)?
        .ok_or(ServiceError::NotFound(EntityKind::Section, section_id))?;
    let owner = repo.owner_of(section_id)?;
    check_owner(owner, account_id)?;
    Ok(section)
}

impl<'c> SectionService<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    /// Lists the live sections of a page; trashed sections stay out.
    pub fn list(&mut self, account_id: &str, page_id: EntityId) -> ServiceResult<Vec<Section>> {
        let tx = self.conn.transaction()?;
        gate_page(&tx, account_id, page_id)?;
        let sections = SectionRepo::new(&tx).list_in(page_id)?;
        tx.commit()?;
        Ok(sections)
    }

    /// Lists every trashed section the account owns, across all pages.
    pub fn list_trash(&mut self, account_id: &str) -> ServiceResult<Vec<Section>> {
        let tx = self.conn.transaction()?;
        let sections = SectionRepo::new(&tx).list_trashed_owned_by(account_id)?;
        tx.commit()?;
        Ok(sections)
    }

    pub fn get(&mut self, account_id: &str, section_id: EntityId) -> ServiceResult<Section> {
        let tx = self.conn.transaction()?;
        let section = gate_section(&tx, account_id, section_id)?;
        tx.commit()?;
        Ok(section)
    }

    pub fn create(
        &mut self,
        account_id: &str,
        page_id: EntityId,
        content: &str,
    ) -> ServiceResult<Section> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_page(&tx, account_id, page_id)?;
        let section = SectionRepo::new(&tx).insert(page_id, content)?;
        tx.commit()?;
        log::info!(
            "event=section_create module=service status=ok section_id={} page_id={page_id}",
            section.section_id
        );
        Ok(section)
    }

    /// Rewrites content and optionally moves the section to another page.
    /// The destination page is gated before the section itself.
    pub fn update(
        &mut self,
        account_id: &str,
        section_id: EntityId,
        page_id: EntityId,
        content: &str,
    ) -> ServiceResult<Section> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_page(&tx, account_id, page_id)?;
        let target = gate_section(&tx, account_id, section_id)?;
        let updated = SectionRepo::new(&tx).update(&target, page_id, content)?;
        tx.commit()?;
        Ok(updated)
    }

    /// Moves a section into the trash. Trashing an already-trashed section
    /// leaves the flag set and still bumps the timestamp.
    pub fn trash(&mut self, account_id: &str, section_id: EntityId) -> ServiceResult<Section> {
        self.set_trashed(account_id, section_id, true)
    }

    /// Restores a trashed section to its page.
    pub fn untrash(&mut self, account_id: &str, section_id: EntityId) -> ServiceResult<Section> {
        self.set_trashed(account_id, section_id, false)
    }

    fn set_trashed(
        &mut self,
        account_id: &str,
        section_id: EntityId,
        trashed: bool,
    ) -> ServiceResult<Section> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_section(&tx, account_id, section_id)?;
        let section = SectionRepo::new(&tx).set_trashed(section_id, trashed)?;
        tx.commit()?;
        log::info!(
            "event=section_trash module=service status=ok section_id={section_id} trashed={trashed}"
        );
        Ok(section)
    }

    pub fn delete(&mut self, account_id: &str, section_id: EntityId) -> ServiceResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_section(&tx, account_id, section_id)?;
        SectionRepo::new(&tx).delete(section_id)?;
        tx.commit()?;
        log::info!("event=section_delete module=service status=ok section_id={section_id}");
        Ok(())
    }
}
