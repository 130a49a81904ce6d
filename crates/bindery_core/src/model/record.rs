//! Read models for persisted entities.
//!
//! # Responsibility
//! - Mirror the persisted table shapes as plain records.
//! - Keep SQL row parsing out of service/business orchestration.
//!
//! # Invariants
//! - Surrogate ids are monotonic and never reused.
//! - Timestamps are unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable surrogate id shared by every persisted entity kind.
pub type EntityId = i64;

/// Entity kinds referenced by not-found reporting.
///
/// Two-resource operations (reparenting, tagging) use this to tell the
/// caller which endpoint of the operation was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Notebook,
    Page,
    Section,
    Tag,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notebook => "notebook",
            Self::Page => "page",
            Self::Section => "section",
            Self::Tag => "tag",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered top-level container owned directly by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub notebook_id: EntityId,
    /// Opaque owning account id from the credential-validation step.
    pub account_id: String,
    /// Unique per account.
    pub title: String,
    /// 1-based position, unique per account. Gaps are permanent and normal.
    pub sort_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Ordered child of a notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_id: EntityId,
    pub notebook_id: EntityId,
    pub title: String,
    /// 1-based position, unique per notebook.
    pub sort_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Unordered content block inside a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_id: EntityId,
    pub page_id: EntityId,
    pub content: String,
    /// Trash flag, independent of containment. Trashed sections are hidden
    /// from page listings but remain recoverable.
    pub is_trashed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Label owned directly by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: EntityId,
    pub account_id: String,
    /// Unique per account.
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Join read model for one section-tag association, carrying the tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTagDetail {
    pub section_id: EntityId,
    pub tag_id: EntityId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}
