//! Row access for the `notebooks` table.

use crate::model::record::{EntityId, Notebook};
use crate::repo::ordered::NOTEBOOKS;
use crate::repo::{map_constraint, RepoError, RepoResult, TOUCH_UPDATED_AT};
use rusqlite::{params, Connection, Row};

pub struct NotebookRepo<'c> {
    conn: &'c Connection,
}

fn read_notebook(row: &Row<'_>) -> rusqlite::Result<Notebook> {
    Ok(Notebook {
        notebook_id: row.get("notebook_id")?,
        account_id: row.get("account_id")?,
        title: row.get("title")?,
        sort_order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl<'c> NotebookRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Lists every notebook owned by `account_id`, ordered head to tail.
    pub fn list_owned_by(&self, account_id: &str) -> RepoResult<Vec<Notebook>> {
        let mut stmt = self.conn.prepare(
            "SELECT notebook_id, account_id, title, sort_order, created_at, updated_at
             FROM notebooks
             WHERE account_id = ?1
             ORDER BY sort_order ASC;",
        )?;
        let mut rows = stmt.query([account_id])?;
        let mut notebooks = Vec::new();
        while let Some(row) = rows.next()? {
            notebooks.push(read_notebook(row)?);
        }
        Ok(notebooks)
    }

    pub fn get(&self, notebook_id: EntityId) -> RepoResult<Option<Notebook>> {
        let mut stmt = self.conn.prepare(
            "SELECT notebook_id, account_id, title, sort_order, created_at, updated_at
             FROM notebooks
             WHERE notebook_id = ?1;",
        )?;
        let mut rows = stmt.query([notebook_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(read_notebook(row)?)),
            None => Ok(None),
        }
    }

    pub fn owner_of(&self, notebook_id: EntityId) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT account_id FROM notebooks WHERE notebook_id = ?1;")?;
        let mut rows = stmt.query([notebook_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Inserts a notebook at `desired_order`, or at the tail when `None`.
    /// Siblings at or past the desired slot shift toward the tail first.
    pub fn insert(
        &self,
        account_id: &str,
        title: &str,
        desired_order: Option<i64>,
    ) -> RepoResult<Notebook> {
        let sort_order = match desired_order {
            Some(desired) => {
                // Orders are 1-based; 0 is reserved for in-flight moves.
                let desired = desired.max(1);
                NOTEBOOKS.make_room(self.conn, account_id, desired)?;
                desired
            }
            None => NOTEBOOKS.next_order(self.conn, account_id)?,
        };

        self.conn
            .execute(
                "INSERT INTO notebooks (account_id, title, sort_order)
                 VALUES (?1, ?2, ?3);",
                params![account_id, title, sort_order],
            )
            .map_err(|err| map_constraint(err, "title"))?;

        let notebook_id = self.conn.last_insert_rowid();
        self.get(notebook_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("notebook {notebook_id} vanished after insert"))
        })
    }

    /// Renames and/or moves `target` within its account.
    pub fn update(
        &self,
        target: &Notebook,
        title: &str,
        new_order: i64,
    ) -> RepoResult<Notebook> {
        NOTEBOOKS.reposition(
            self.conn,
            target.account_id.as_str(),
            target.notebook_id,
            target.sort_order,
            new_order.max(1),
        )?;

        let sql = format!(
            "UPDATE notebooks
             SET title = ?2, updated_at = {TOUCH_UPDATED_AT}
             WHERE notebook_id = ?1;"
        );
        self.conn
            .execute(&sql, params![target.notebook_id, title])
            .map_err(|err| map_constraint(err, "title"))?;

        self.get(target.notebook_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "notebook {} vanished during update",
                target.notebook_id
            ))
        })
    }

    /// Deletes the notebook and, through the schema cascade, its pages and
    /// sections. Sibling orders are left untouched; gaps are allowed.
    pub fn delete(&self, notebook_id: EntityId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM notebooks WHERE notebook_id = ?1;", [notebook_id])?;
        Ok(())
    }
}
