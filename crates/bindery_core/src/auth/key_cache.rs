use crate::auth::fetcher::{KeyFetchError, KeyFetcher};
use crate::auth::VerificationKey;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum KeyCacheError {
    /// The first-ever fetch failed. There is no key to fall back to, so
    /// callers cannot verify anything and should treat this as fatal.
    Initialization(KeyFetchError),
}

impl fmt::Display for KeyCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCacheError::Initialization(err) => {
                write!(f, "verification key never fetched: {err}")
            }
        }
    }
}

impl Error for KeyCacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KeyCacheError::Initialization(err) => Some(err),
        }
    }
}

struct CachedKey {
    key: VerificationKey,
    fetched_at: Instant,
}

/// TTL cache for the verification key.
///
/// The lock is held across the fetch on purpose. When the cached key goes
/// stale under load, the first caller refreshes while the rest wait on the
/// mutex and then read the fresh entry, so the upstream sees one request
/// per expiry rather than one per caller.
pub struct KeyCache<F: KeyFetcher> {
    fetcher: F,
    refresh_interval: Duration,
    slot: Mutex<Option<CachedKey>>,
}

impl<F: KeyFetcher> KeyCache<F> {
    pub fn new(fetcher: F, refresh_interval: Duration) -> Self {
        Self {
            fetcher,
            refresh_interval,
            slot: Mutex::new(None),
        }
    }

    /// Returns the current verification key, refreshing it when the cached
    /// copy is older than the refresh interval. A failed refresh logs and
    /// serves the previous key; only a failure with nothing cached errors.
    pub fn get(&self) -> Result<VerificationKey, KeyCacheError> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(cached) = slot.as_ref() {
            if cached.fetched_at.elapsed() < self.refresh_interval {
                return Ok(cached.key.clone());
            }
        }

        match self.fetcher.fetch() {
            Ok(key) => {
                log::info!("event=key_refresh module=auth status=ok");
                *slot = Some(CachedKey {
                    key: key.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(key)
            }
            Err(err) => match slot.as_ref() {
                Some(cached) => {
                    log::warn!(
                        "event=key_refresh module=auth status=stale_served error={err}"
                    );
                    Ok(cached.key.clone())
                }
                None => {
                    log::error!("event=key_refresh module=auth status=error error={err}");
                    Err(KeyCacheError::Initialization(err))
                }
            },
        }
    }
}
