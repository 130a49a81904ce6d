//! Domain model for the account/notebook/page/section/tag hierarchy.
//!
//! # Responsibility
//! - Define the read models produced by the repository layer.
//! - Name the entity kinds used by not-found reporting.
//!
//! # Invariants
//! - Accounts are external principals; only their opaque id appears here.
//! - `sort_order` is unique within its owning scope at every observable point.

pub mod record;
