//! Row access for the `pages` table. Ownership is derived through the
//! containing notebook.

use crate::model::record::{EntityId, Page};
use crate::repo::ordered::PAGES;
use crate::repo::{RepoError, RepoResult, TOUCH_UPDATED_AT};
use rusqlite::{params, Connection, Row};

pub struct PageRepo<'c> {
    conn: &'c Connection,
}

fn read_page(row: &Row<'_>) -> rusqlite::Result<Page> {
    Ok(Page {
        page_id: row.get("page_id")?,
        notebook_id: row.get("notebook_id")?,
        title: row.get("title")?,
        sort_order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl<'c> PageRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list_in(&self, notebook_id: EntityId) -> RepoResult<Vec<Page>> {
        let mut stmt = self.conn.prepare(
            "SELECT page_id, notebook_id, title, sort_order, created_at, updated_at
             FROM pages
             WHERE notebook_id = ?1
             ORDER BY sort_order ASC;",
        )?;
        let mut rows = stmt.query([notebook_id])?;
        let mut pages = Vec::new();
        while let Some(row) = rows.next()? {
            pages.push(read_page(row)?);
        }
        Ok(pages)
    }

    pub fn get(&self, page_id: EntityId) -> RepoResult<Option<Page>> {
        let mut stmt = self.conn.prepare(
            "SELECT page_id, notebook_id, title, sort_order, created_at, updated_at
             FROM pages
             WHERE page_id = ?1;",
        )?;
        let mut rows = stmt.query([page_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(read_page(row)?)),
            None => Ok(None),
        }
    }

    /// Resolves the account owning the notebook that contains `page_id`.
    pub fn owner_of(&self, page_id: EntityId) -> RepoResult<Option<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT n.account_id
             FROM pages p
             JOIN notebooks n ON n.notebook_id = p.notebook_id
             WHERE p.page_id = ?1;",
        )?;
        let mut rows = stmt.query([page_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn insert(
        &self,
        notebook_id: EntityId,
        title: &str,
        desired_order: Option<i64>,
    ) -> RepoResult<Page> {
        let sort_order = match desired_order {
            Some(desired) => {
                // Orders are 1-based; 0 is reserved for in-flight moves.
                let desired = desired.max(1);
                PAGES.make_room(self.conn, notebook_id, desired)?;
                desired
            }
            None => PAGES.next_order(self.conn, notebook_id)?,
        };

        self.conn.execute(
            "INSERT INTO pages (notebook_id, title, sort_order)
             VALUES (?1, ?2, ?3);",
            params![notebook_id, title, sort_order],
        )?;

        let page_id = self.conn.last_insert_rowid();
        self.get(page_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("page {page_id} vanished after insert"))
        })
    }

    /// Retitles and moves `target`. A move within its current notebook is a
    /// reposition; a move into `notebook_id` opens a slot in the destination
    /// and drops the row in. Orders left behind in the source notebook may
    /// have gaps.
    pub fn update(
        &self,
        target: &Page,
        notebook_id: EntityId,
        title: &str,
        new_order: i64,
    ) -> RepoResult<Page> {
        let new_order = new_order.max(1);
        if notebook_id == target.notebook_id {
            PAGES.reposition(
                self.conn,
                notebook_id,
                target.page_id,
                target.sort_order,
                new_order,
            )?;
        } else {
            PAGES.make_room(self.conn, notebook_id, new_order)?;
            self.conn.execute(
                "UPDATE pages SET notebook_id = ?2, sort_order = ?3 WHERE page_id = ?1;",
                params![target.page_id, notebook_id, new_order],
            )?;
        }

        let sql = format!(
            "UPDATE pages
             SET title = ?2, updated_at = {TOUCH_UPDATED_AT}
             WHERE page_id = ?1;"
        );
        self.conn.execute(&sql, params![target.page_id, title])?;

        self.get(target.page_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("page {} vanished during update", target.page_id))
        })
    }

    pub fn delete(&self, page_id: EntityId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM pages WHERE page_id = ?1;", [page_id])?;
        Ok(())
    }
}
