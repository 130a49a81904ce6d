use crate::model::record::{EntityId, EntityKind, SectionTagDetail};
use crate::repo::section_repo::SectionRepo;
use crate::repo::section_tag_repo::SectionTagRepo;
use crate::repo::tag_repo::TagRepo;
use crate::service::{check_owner, ServiceError, ServiceResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};

pub struct SectionTagService<'c> {
    conn: &'c mut Connection,
}

/// Gates the section and the tag independently, section first. Both must
/// exist and both must belong to `account_id`.
fn gate_pair(
    tx: &Transaction<'_>,
    account_id: &str,
    section_id: EntityId,
    tag_id: EntityId,
) -> ServiceResult<()> {
    let sections = SectionRepo::new(tx);
    sections
        .get(section_id)?
        .ok_or(ServiceError::NotFound(EntityKind::Section, section_id))?;
    check_owner(sections.owner_of(section_id)?, account_id)?;

    let tags = TagRepo::new(tx);
    let tag = tags
        .get(tag_id)?
        .ok_or(ServiceError::NotFound(EntityKind::Tag, tag_id))?;
    check_owner(Some(tag.account_id), account_id)
}

impl<'c> SectionTagService<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    pub fn list_tags(
        &mut self,
        account_id: &str,
        section_id: EntityId,
    ) -> ServiceResult<Vec<SectionTagDetail>> {
        let tx = self.conn.transaction()?;
        let sections = SectionRepo::new(&tx);
        sections
            .get(section_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Section, section_id))?;
        check_owner(sections.owner_of(section_id)?, account_id)?;
        let details = SectionTagRepo::new(&tx).list_for_section(section_id)?;
        drop(sections);
        tx.commit()?;
        Ok(details)
    }

    /// Attaches a tag to a section. Attaching a pair that is already
    /// attached reports a duplicate and leaves the single row in place.
    pub fn attach(
        &mut self,
        account_id: &str,
        section_id: EntityId,
        tag_id: EntityId,
    ) -> ServiceResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_pair(&tx, account_id, section_id, tag_id)?;
        SectionTagRepo::new(&tx).attach(section_id, tag_id)?;
        tx.commit()?;
        log::info!(
            "event=section_tag_attach module=service status=ok section_id={section_id} tag_id={tag_id}"
        );
        Ok(())
    }

    /// Detaches a tag from a section. Detaching a pair that was never
    /// attached succeeds without effect.
    pub fn detach(
        &mut self,
        account_id: &str,
        section_id: EntityId,
        tag_id: EntityId,
    ) -> ServiceResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        gate_pair(&tx, account_id, section_id, tag_id)?;
        SectionTagRepo::new(&tx).detach(section_id, tag_id)?;
        tx.commit()?;
        log::info!(
            "event=section_tag_detach module=service status=ok section_id={section_id} tag_id={tag_id}"
        );
        Ok(())
    }
}
