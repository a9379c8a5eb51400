//! Single-slot rate cache with TTL.
//!
//! Holds at most one [`RateSnapshot`]. Expiry is checked on every read, so an
//! entry past its deadline is invisible even if the sweeper has not run yet.
//! The sweeper only reclaims memory.

use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use fx_types::RateSnapshot;

/// Default time-to-live for a cached snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: RateSnapshot,
    deadline: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.deadline
    }
}

/// Thread-safe single-slot cache for the latest rate snapshot.
#[derive(Debug)]
pub struct RateCache {
    slot: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl RateCache {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached snapshot if present and not expired.
    ///
    /// "Never fetched" and "expired" are indistinguishable to callers.
    pub fn get(&self) -> Option<RateSnapshot> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.snapshot.clone())
    }

    /// Stores `snapshot` with a fresh deadline, replacing any prior entry.
    pub fn put(&self, snapshot: RateSnapshot) {
        let entry = CacheEntry {
            snapshot,
            deadline: Instant::now() + self.ttl,
        };
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    /// Removes the entry if it has expired. Returns whether anything was reclaimed.
    pub fn purge_expired(&self) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(entry) if !entry.is_live(Instant::now()) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the slot physically holds an entry, expired or not.
    pub fn is_occupied(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Spawns a task that purges expired entries every `every`.
///
/// The task holds a weak reference and exits once the cache is dropped.
pub fn spawn_sweeper(cache: &Arc<RateCache>, every: Duration) -> JoinHandle<()> {
    let cache: Weak<RateCache> = Arc::downgrade(cache);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(cache) = cache.upgrade() else {
                tracing::debug!("rate cache dropped, stopping sweeper");
                break;
            };
            if cache.purge_expired() {
                tracing::debug!("swept expired rate snapshot");
            }
        }
    })
}
