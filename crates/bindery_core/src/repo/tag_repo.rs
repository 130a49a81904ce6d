//! Row access for the `tags` table. Tag names are unique per account.

use crate::model::record::{EntityId, Tag};
use crate::repo::{map_constraint, RepoError, RepoResult, TOUCH_UPDATED_AT};
use rusqlite::{params, Connection, Row};

pub struct TagRepo<'c> {
    conn: &'c Connection,
}

fn read_tag(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        tag_id: row.get("tag_id")?,
        account_id: row.get("account_id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl<'c> TagRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list_owned_by(&self, account_id: &str) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT tag_id, account_id, name, created_at, updated_at
             FROM tags
             WHERE account_id = ?1
             ORDER BY name ASC;",
        )?;
        let mut rows = stmt.query([account_id])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(read_tag(row)?);
        }
        Ok(tags)
    }

    pub fn get(&self, tag_id: EntityId) -> RepoResult<Option<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT tag_id, account_id, name, created_at, updated_at
             FROM tags
             WHERE tag_id = ?1;",
        )?;
        let mut rows = stmt.query([tag_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(read_tag(row)?)),
            None => Ok(None),
        }
    }

    pub fn owner_of(&self, tag_id: EntityId) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT account_id FROM tags WHERE tag_id = ?1;")?;
        let mut rows = stmt.query([tag_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn insert(&self, account_id: &str, name: &str) -> RepoResult<Tag> {
        self.conn
            .execute(
                "INSERT INTO tags (account_id, name) VALUES (?1, ?2);",
                params![account_id, name],
            )
            .map_err(|err| map_constraint(err, "name"))?;

        let tag_id = self.conn.last_insert_rowid();
        self.get(tag_id)?
            .ok_or_else(|| RepoError::InvalidData(format!("tag {tag_id} vanished after insert")))
    }

    pub fn update(&self, tag_id: EntityId, name: &str) -> RepoResult<Tag> {
        let sql = format!(
            "UPDATE tags
             SET name = ?2, updated_at = {TOUCH_UPDATED_AT}
             WHERE tag_id = ?1;"
        );
        self.conn
            .execute(&sql, params![tag_id, name])
            .map_err(|err| map_constraint(err, "name"))?;

        self.get(tag_id)?
            .ok_or_else(|| RepoError::InvalidData(format!("tag {tag_id} vanished during update")))
    }

    pub fn delete(&self, tag_id: EntityId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tags WHERE tag_id = ?1;", [tag_id])?;
        Ok(())
    }
}
