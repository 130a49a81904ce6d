//! Row access for the `section_tags` association table. Listings join the
//! tag row so callers get the display name without a second query.

use crate::model::record::{EntityId, SectionTagDetail};
use crate::repo::{map_constraint, RepoResult};
use rusqlite::{params, Connection, Row};

pub struct SectionTagRepo<'c> {
    conn: &'c Connection,
}

fn read_detail(row: &Row<'_>) -> rusqlite::Result<SectionTagDetail> {
    Ok(SectionTagDetail {
        section_id: row.get("section_id")?,
        tag_id: row.get("tag_id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl<'c> SectionTagRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list_for_section(&self, section_id: EntityId) -> RepoResult<Vec<SectionTagDetail>> {
        let mut stmt = self.conn.prepare(
            "SELECT st.section_id, st.tag_id, t.name, st.created_at, st.updated_at
             FROM section_tags st
             JOIN tags t ON t.tag_id = st.tag_id
             WHERE st.section_id = ?1
             ORDER BY t.name ASC;",
        )?;
        let mut rows = stmt.query([section_id])?;
        let mut details = Vec::new();
        while let Some(row) = rows.next()? {
            details.push(read_detail(row)?);
        }
        Ok(details)
    }

    /// Associates a tag with a section. Attaching the same pair twice fails
    /// the unique constraint and surfaces as a duplicate.
    pub fn attach(&self, section_id: EntityId, tag_id: EntityId) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO section_tags (section_id, tag_id) VALUES (?1, ?2);",
                params![section_id, tag_id],
            )
            .map_err(|err| map_constraint(err, "tag_id"))?;
        Ok(())
    }

    /// Removes the association if present. Returns the number of rows
    /// removed; detaching a pair that was never attached is not an error.
    pub fn detach(&self, section_id: EntityId, tag_id: EntityId) -> RepoResult<usize> {
        let affected = self.conn.execute(
            "DELETE FROM section_tags WHERE section_id = ?1 AND tag_id = ?2;",
            params![section_id, tag_id],
        )?;
        Ok(affected)
    }
}
