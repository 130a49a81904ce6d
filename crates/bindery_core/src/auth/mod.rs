//! Verification-key retrieval and caching.
//!
//! # Responsibility
//! - Fetch the token-verification public key from the account service and
//!   hold it in process memory so request handling never waits on the
//!   network once a key is known.
//!
//! # Invariants
//! - At most one fetch is in flight at a time; concurrent callers block on
//!   the cache lock and reuse the result.
//! - A known key is never discarded because a refresh failed. Only the
//!   very first fetch failing is fatal, since there is nothing to serve.

mod fetcher;
mod key_cache;

pub use fetcher::{HttpKeyFetcher, KeyFetchError, KeyFetcher};
pub use key_cache::{KeyCache, KeyCacheError};

use std::fmt;

/// Raw verification-key bytes as served by the account service.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationKey(pub Vec<u8>);

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material stays out of logs; the length is enough to debug with.
        write!(f, "VerificationKey({} bytes)", self.0.len())
    }
}
