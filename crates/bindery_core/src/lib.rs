//! Core domain logic for Bindery, a multi-tenant note-organizing backend.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::{
    HttpKeyFetcher, KeyCache, KeyCacheError, KeyFetchError, KeyFetcher, VerificationKey,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{EntityId, EntityKind, Notebook, Page, Section, SectionTagDetail, Tag};
pub use repo::{RepoError, RepoResult};
pub use service::{
    NotebookService, PageService, SectionService, SectionTagService, ServiceError, ServiceResult,
    TagService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
