//! In-memory conversation session store.
//!
//! Sessions are keyed by an opaque CSPRNG token and bounded two ways: an
//! idle TTL and a maximum count with least-recently-used eviction. Each
//! handle sits behind its own async mutex so turns on one conversation are
//! applied one at a time.

mod clock;
mod id;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use id::{generate_session_id, SESSION_ID_LEN};

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use groundsearch_types::SessionConfig;

/// Shared, lockable conversation handle.
pub type SessionHandle<H> = Arc<Mutex<H>>;

struct SessionEntry<H> {
    handle: SessionHandle<H>,
    created_at: Instant,
    last_access: Instant,
    /// Tie-breaker for LRU ordering when the clock has not moved.
    touch_seq: u64,
}

pub struct SessionStore<H> {
    entries: DashMap<String, SessionEntry<H>>,
    ttl: Duration,
    max_sessions: usize,
    clock: Arc<dyn Clock>,
    touches: AtomicU64,
}

impl<H> SessionStore<H> {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_secs(config.ttl_secs),
            max_sessions: config.max_sessions.max(1),
            clock,
            touches: AtomicU64::new(0),
        }
    }

    /// A fresh identifier not currently in use.
    pub fn create(&self) -> String {
        loop {
            let id = generate_session_id();
            if !self.entries.contains_key(&id) {
                return id;
            }
        }
    }

    /// Store `handle` under `id`, replacing any previous entry.
    pub fn put(&self, id: String, handle: H) -> SessionHandle<H> {
        let now = self.clock.now();
        let handle = Arc::new(Mutex::new(handle));
        self.entries.insert(
            id,
            SessionEntry {
                handle: Arc::clone(&handle),
                created_at: now,
                last_access: now,
                touch_seq: self.next_seq(),
            },
        );
        self.enforce_capacity();
        handle
    }

    /// Store `handle` under a new identifier and return that identifier.
    pub fn insert(&self, handle: H) -> String {
        let id = self.create();
        self.put(id.clone(), handle);
        id
    }

    /// Look up a live session and mark it as used.
    pub fn get(&self, id: &str) -> Option<SessionHandle<H>> {
        let now = self.clock.now();
        {
            let mut entry = self.entries.get_mut(id)?;
            if !self.is_expired(&entry, now) {
                entry.last_access = now;
                entry.touch_seq = self.next_seq();
                return Some(Arc::clone(&entry.handle));
            }
        }
        if let Some((_, entry)) = self.entries.remove_if(id, |_, entry| self.is_expired(entry, now)) {
            debug!(
                "[SessionStore] Session expired on access after {}s",
                now.saturating_duration_since(entry.created_at).as_secs()
            );
        }
        None
    }

    pub fn remove(&self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop sessions idle longer than the TTL. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!("[SessionStore] Evicted {} expired sessions", removed);
        }
        removed
    }

    fn enforce_capacity(&self) {
        if self.entries.len() <= self.max_sessions {
            return;
        }
        self.evict_expired();

        while self.entries.len() > self.max_sessions {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| (entry.value().last_access, entry.value().touch_seq))
                .map(|entry| entry.key().clone());
            match oldest {
                Some(id) => {
                    self.entries.remove(&id);
                    debug!("[SessionStore] Capacity reached, evicted least recently used session");
                },
                None => break,
            }
        }
    }

    fn is_expired(&self, entry: &SessionEntry<H>, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_access) > self.ttl
    }

    fn next_seq(&self) -> u64 {
        self.touches.fetch_add(1, Ordering::Relaxed)
    }
}
