//! Repository layer: SQLite persistence for all entity kinds.
//!
//! # Responsibility
//! - Keep SQL query details inside the persistence boundary.
//! - Recognize unique-constraint violations and surface them as
//!   field-accurate `Duplicate` errors.
//!
//! # Invariants
//! - Absence is reported as `Ok(None)`, never as an error; callers decide
//!   how to surface it.
//! - Mutating entry points expect to run inside the caller's immediate
//!   transaction, which stands in for `SELECT ... FOR UPDATE` row locks.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) mod ordered;

pub mod notebook_repo;
pub mod page_repo;
pub mod section_repo;
pub mod section_tag_repo;
pub mod tag_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error shared by all repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap failure (the unexpected class).
    Db(DbError),
    /// A uniqueness constraint fired; carries the conflicting field name.
    Duplicate(&'static str),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate(field) => write!(f, "duplicate value for unique field `{field}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Duplicate(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a constraint violation to `Duplicate(field)` for the uniqueness rule
/// the calling statement can fire; everything else stays a `Db` error.
pub(crate) fn map_constraint(err: rusqlite::Error, field: &'static str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(ffi_err, _)
            if ffi_err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            RepoError::Duplicate(field)
        }
        _ => err.into(),
    }
}

/// SQL expression used to bump `updated_at` on content mutations.
pub(crate) const TOUCH_UPDATED_AT: &str = "(strftime('%s', 'now') * 1000)";

pub(crate) fn parse_flag(value: i64, column: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}
