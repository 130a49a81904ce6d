//! Generic ordered-store helpers for scope-unique `sort_order` columns.
//!
//! # Responsibility
//! - Own the shift/move arithmetic shared by notebooks (scoped per account)
//!   and pages (scoped per notebook).
//!
//! # Invariants
//! - No two rows in one scope share a `sort_order`, at every statement
//!   boundary, not just at commit.
//! - Orders are 1-based; `sort_order = 0` is reserved as the parking slot
//!   for a row mid-move.
//! - Every shift touches one row per statement, highest-first for
//!   increments and lowest-first for decrements, so the per-scope unique
//!   constraint never observes a transient collision.

use crate::model::record::EntityId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, ToSql};

/// Descriptor for one table carrying a scope-unique `sort_order` column.
pub(crate) struct OrderedTable {
    pub table: &'static str,
    pub id_column: &'static str,
    pub scope_column: &'static str,
}

/// Notebooks are ordered per owning account.
pub(crate) const NOTEBOOKS: OrderedTable = OrderedTable {
    table: "notebooks",
    id_column: "notebook_id",
    scope_column: "account_id",
};

/// Pages are ordered per containing notebook.
pub(crate) const PAGES: OrderedTable = OrderedTable {
    table: "pages",
    id_column: "page_id",
    scope_column: "notebook_id",
};

enum Direction {
    Ascending,
    Descending,
}

impl OrderedTable {
    /// Returns the append position for `scope`: highest order plus one.
    pub fn next_order<S: ToSql>(&self, conn: &Connection, scope: S) -> RepoResult<i64> {
        let sql = format!(
            "SELECT COALESCE(MAX(sort_order), 0) + 1
             FROM {table}
             WHERE {scope_column} = ?1;",
            table = self.table,
            scope_column = self.scope_column,
        );
        Ok(conn.query_row(&sql, params![scope], |row| row.get(0))?)
    }

    /// Opens a free slot at `desired` by incrementing every row in `scope`
    /// with `sort_order >= desired`, highest current order first.
    pub fn make_room<S: ToSql + Copy>(
        &self,
        conn: &Connection,
        scope: S,
        desired: i64,
    ) -> RepoResult<()> {
        let ids = self.ids_in_range(conn, scope, desired, i64::MAX, Direction::Descending)?;
        for id in ids {
            self.shift_one(conn, id, 1)?;
        }
        Ok(())
    }

    /// Moves the row `id` from `old_order` to `new_order` within the same
    /// scope without ever duplicating an order value.
    ///
    /// The row is first parked at order 0, then the displaced range is
    /// shifted one row at a time (incremented descending for a move toward
    /// the head, decremented ascending for a move toward the tail), and the
    /// row is finally placed at `new_order`.
    pub fn reposition<S: ToSql + Copy>(
        &self,
        conn: &Connection,
        scope: S,
        id: EntityId,
        old_order: i64,
        new_order: i64,
    ) -> RepoResult<()> {
        if new_order == old_order {
            return Ok(());
        }

        self.place(conn, id, 0)?;

        if new_order < old_order {
            let ids =
                self.ids_in_range(conn, scope, new_order, old_order - 1, Direction::Descending)?;
            for sibling_id in ids {
                self.shift_one(conn, sibling_id, 1)?;
            }
        } else {
            let ids =
                self.ids_in_range(conn, scope, old_order + 1, new_order, Direction::Ascending)?;
            for sibling_id in ids {
                self.shift_one(conn, sibling_id, -1)?;
            }
        }

        self.place(conn, id, new_order)
    }

    fn ids_in_range<S: ToSql>(
        &self,
        conn: &Connection,
        scope: S,
        low: i64,
        high: i64,
        direction: Direction,
    ) -> RepoResult<Vec<EntityId>> {
        let order_keyword = match direction {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        };
        let sql = format!(
            "SELECT {id_column}
             FROM {table}
             WHERE {scope_column} = ?1
               AND sort_order >= ?2
               AND sort_order <= ?3
             ORDER BY sort_order {order_keyword};",
            id_column = self.id_column,
            table = self.table,
            scope_column = self.scope_column,
        );

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params![scope, low, high])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }

    fn shift_one(&self, conn: &Connection, id: EntityId, delta: i64) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {table}
             SET sort_order = sort_order + ?2
             WHERE {id_column} = ?1;",
            table = self.table,
            id_column = self.id_column,
        );
        conn.execute(&sql, params![id, delta])?;
        Ok(())
    }

    fn place(&self, conn: &Connection, id: EntityId, sort_order: i64) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {table}
             SET sort_order = ?2
             WHERE {id_column} = ?1;",
            table = self.table,
            id_column = self.id_column,
        );
        conn.execute(&sql, params![id, sort_order])?;
        Ok(())
    }
}
