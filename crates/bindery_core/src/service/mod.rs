//! Ownership-checked operations over the repo layer.
//!
//! # Responsibility
//! - Wrap every mutation in an immediate (write-locked) transaction so a
//!   whole order-shift or move lands atomically and concurrent writers to
//!   the same scope serialize at the start of the operation.
//! - Enforce the access gate: a request for a row that does not exist
//!   reports not-found, and a request for a row owned by another account
//!   reports forbidden. Existence is always checked first, so a caller
//!   probing foreign ids learns the row exists but nothing else.
//!
//! # Invariants
//! - Read-modify-write never spans two transactions.
//! - Ownership is resolved inside the same transaction as the mutation.

mod notebook_service;
mod page_service;
mod section_service;
mod section_tag_service;
mod tag_service;

pub use notebook_service::NotebookService;
pub use page_service::PageService;
pub use section_service::SectionService;
pub use section_tag_service::SectionTagService;
pub use tag_service::TagService;

use crate::model::record::{EntityId, EntityKind};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// The addressed row does not exist.
    NotFound(EntityKind, EntityId),
    /// The addressed row exists but belongs to another account.
    Forbidden,
    /// The write collided with a per-account or per-pair uniqueness rule.
    /// The field names the offending column.
    Duplicate(&'static str),
    /// A storage failure below the ownership layer.
    Repo(RepoError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(kind, id) => write!(f, "{kind} {id} not found"),
            ServiceError::Forbidden => write!(f, "resource is owned by another account"),
            ServiceError::Duplicate(field) => write!(f, "duplicate value for {field}"),
            ServiceError::Repo(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(field) => ServiceError::Duplicate(field),
            other => {
                log::error!("event=persistence_error module=service status=error error={other}");
                ServiceError::Repo(other)
            }
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::from(RepoError::from(err))
    }
}

/// Applies the ownership gate after existence has been established.
pub(crate) fn check_owner(owner: Option<String>, account_id: &str) -> ServiceResult<()> {
    match owner {
        Some(owner) if owner == account_id => Ok(()),
        _ => Err(ServiceError::Forbidden),
    }
}
