//! Row access for the `sections` table. Sections are unordered; listings
//! use insertion order. Trashed sections stay in the table with
//! `is_trashed = 1` until deleted outright.

use crate::model::record::{EntityId, Section};
use crate::repo::{parse_flag, RepoError, RepoResult, TOUCH_UPDATED_AT};
use rusqlite::{params, Connection, Row};

pub struct SectionRepo<'c> {
    conn: &'c Connection,
}

fn read_section(row: &Row<'_>) -> Result<Section, RepoError> {
    Ok(Section {
        section_id: row.get("section_id")?,
        page_id: row.get("page_id")?,
        content: row.get("content")?,
        is_trashed: parse_flag(row.get("is_trashed")?, "is_trashed")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl<'c> SectionRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Lists the live sections of `page_id`; trashed rows are excluded.
    pub fn list_in(&self, page_id: EntityId) -> RepoResult<Vec<Section>> {
        let mut stmt = self.conn.prepare(
            "SELECT section_id, page_id, content, is_trashed, created_at, updated_at
             FROM sections
             WHERE page_id = ?1 AND is_trashed = 0
             ORDER BY section_id ASC;",
        )?;
        let mut rows = stmt.query([page_id])?;
        let mut sections = Vec::new();
        while let Some(row) = rows.next()? {
            sections.push(read_section(row)?);
        }
        Ok(sections)
    }

    /// Lists every trashed section owned by `account_id`, across all of its
    /// notebooks and pages.
    pub fn list_trashed_owned_by(&self, account_id: &str) -> RepoResult<Vec<Section>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.section_id, s.page_id, s.content, s.is_trashed, s.created_at, s.updated_at
             FROM sections s
             JOIN pages p ON p.page_id = s.page_id
             JOIN notebooks n ON n.notebook_id = p.notebook_id
             WHERE n.account_id = ?1 AND s.is_trashed = 1
             ORDER BY s.section_id ASC;",
        )?;
        let mut rows = stmt.query([account_id])?;
        let mut sections = Vec::new();
        while let Some(row) = rows.next()? {
            sections.push(read_section(row)?);
        }
        Ok(sections)
    }

    pub fn get(&self, section_id: EntityId) -> RepoResult<Option<Section>> {
        let mut stmt = self.conn.prepare(
            "SELECT section_id, page_id, content, is_trashed, created_at, updated_at
             FROM sections
             WHERE section_id = ?1;",
        )?;
        let mut rows = stmt.query([section_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(read_section(row)?)),
            None => Ok(None),
        }
    }

    /// Resolves the owning account through the page and notebook chain.
    pub fn owner_of(&self, section_id: EntityId) -> RepoResult<Option<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT n.account_id
             FROM sections s
             JOIN pages p ON p.page_id = s.page_id
             JOIN notebooks n ON n.notebook_id = p.notebook_id
             WHERE s.section_id = ?1;",
        )?;
        let mut rows = stmt.query([section_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn insert(&self, page_id: EntityId, content: &str) -> RepoResult<Section> {
        self.conn.execute(
            "INSERT INTO sections (page_id, content) VALUES (?1, ?2);",
            params![page_id, content],
        )?;

        let section_id = self.conn.last_insert_rowid();
        self.get(section_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("section {section_id} vanished after insert"))
        })
    }

    /// Rewrites the content and owning page of `target`.
    pub fn update(
        &self,
        target: &Section,
        page_id: EntityId,
        content: &str,
    ) -> RepoResult<Section> {
        let sql = format!(
            "UPDATE sections
             SET page_id = ?2, content = ?3, updated_at = {TOUCH_UPDATED_AT}
             WHERE section_id = ?1;"
        );
        self.conn
            .execute(&sql, params![target.section_id, page_id, content])?;

        self.get(target.section_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "section {} vanished during update",
                target.section_id
            ))
        })
    }

    /// Sets the trash flag. The timestamp bumps even when the flag already
    /// holds the requested value.
    pub fn set_trashed(&self, section_id: EntityId, trashed: bool) -> RepoResult<Section> {
        let sql = format!(
            "UPDATE sections
             SET is_trashed = ?2, updated_at = {TOUCH_UPDATED_AT}
             WHERE section_id = ?1;"
        );
        self.conn
            .execute(&sql, params![section_id, trashed as i64])?;

        self.get(section_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("section {section_id} vanished during trash update"))
        })
    }

    pub fn delete(&self, section_id: EntityId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM sections WHERE section_id = ?1;", [section_id])?;
        Ok(())
    }
}
