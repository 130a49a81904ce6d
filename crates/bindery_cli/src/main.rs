//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bindery_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("bindery_core version={}", bindery_core::core_version());
    println!(
        "bindery_core schema_version={}",
        bindery_core::db::migrations::latest_version()
    );
}
