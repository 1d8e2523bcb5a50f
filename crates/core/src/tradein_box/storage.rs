//! Box storage strategies

use std::sync::{Arc, Mutex, MutexGuard};

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::{BoxError, BoxItem};

/// Where a trade-in box keeps its items between operations.
pub trait BoxStorage {
    /// Read every item in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable.
    fn load(&self) -> Result<Vec<BoxItem>, BoxError>;

    /// Apply `change` to the stored items as one atomic read-modify-write.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable.
    fn update<R>(&mut self, change: impl FnOnce(&mut Vec<BoxItem>) -> R) -> Result<R, BoxError>;
}

/// Items held by the box itself; gone when the box is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Vec<BoxItem>,
}

impl BoxStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<BoxItem>, BoxError> {
        Ok(self.items.clone())
    }

    fn update<R>(&mut self, change: impl FnOnce(&mut Vec<BoxItem>) -> R) -> Result<R, BoxError> {
        Ok(change(&mut self.items))
    }
}

/// Identifier of a browsing session.
pub type SessionId = Uuid;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TTL: SignedDuration = SignedDuration::from_hours(2);

/// Upper bound on how often idle sessions are swept.
const SWEEP_INTERVAL: SignedDuration = SignedDuration::from_mins(1);

#[derive(Debug)]
struct SessionEntry {
    items: Vec<BoxItem>,
    touched_at: Timestamp,
}

#[derive(Debug)]
struct Sessions {
    entries: FxHashMap<SessionId, SessionEntry>,
    next_sweep: Timestamp,
}

impl Sessions {
    /// Drop entries idle for at least `ttl`; returns how many went.
    fn evict_idle(&mut self, now: Timestamp, ttl: SignedDuration) -> usize {
        let before = self.entries.len();

        self.entries
            .retain(|_, entry| now.duration_since(entry.touched_at) < ttl);

        self.next_sweep = now.checked_add(ttl.min(SWEEP_INTERVAL)).unwrap_or(now);

        before - self.entries.len()
    }

    fn sweep_if_due(&mut self, now: Timestamp, ttl: SignedDuration) {
        if now >= self.next_sweep {
            self.evict_idle(now, ttl);
        }
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            next_sweep: Timestamp::UNIX_EPOCH,
        }
    }
}

/// Process-wide map of session boxes.
///
/// Boxes outlive individual requests but not the process. A session nobody has
/// read or written for the idle TTL is evicted along with its items.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<Sessions>>,
    idle_ttl: SignedDuration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionStore {
    /// An empty store using [`DEFAULT_IDLE_TTL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store evicting sessions idle for `idle_ttl`.
    pub fn with_idle_ttl(idle_ttl: SignedDuration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    /// How long an untouched session is kept.
    pub fn idle_ttl(&self) -> SignedDuration {
        self.idle_ttl
    }

    /// Storage handle for one session.
    pub fn session(&self, session: SessionId) -> SessionStorage {
        SessionStorage {
            store: self.clone(),
            session,
        }
    }

    /// Number of sessions currently holding items.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if the lock is poisoned.
    pub fn active_sessions(&self) -> Result<usize, BoxError> {
        Ok(self.lock()?.entries.len())
    }

    /// Evict every session idle at `now`, returning how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if the lock is poisoned.
    pub fn evict_idle(&self, now: Timestamp) -> Result<usize, BoxError> {
        Ok(self.lock()?.evict_idle(now, self.idle_ttl))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Sessions>, BoxError> {
        self.sessions
            .lock()
            .map_err(|_poisoned| BoxError::StorageUnavailable)
    }
}

/// A [`SessionStore`] entry used as box storage.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    store: SessionStore,
    session: SessionId,
}

impl SessionStorage {
    /// The session this storage belongs to.
    pub fn session(&self) -> SessionId {
        self.session
    }
}

impl BoxStorage for SessionStorage {
    fn load(&self) -> Result<Vec<BoxItem>, BoxError> {
        let now = Timestamp::now();
        let mut sessions = self.store.lock()?;

        sessions.sweep_if_due(now, self.store.idle_ttl);

        Ok(sessions
            .entries
            .get_mut(&self.session)
            .map(|entry| {
                entry.touched_at = now;
                entry.items.clone()
            })
            .unwrap_or_default())
    }

    fn update<R>(&mut self, change: impl FnOnce(&mut Vec<BoxItem>) -> R) -> Result<R, BoxError> {
        let now = Timestamp::now();
        let mut sessions = self.store.lock()?;

        sessions.sweep_if_due(now, self.store.idle_ttl);

        let mut items = sessions
            .entries
            .remove(&self.session)
            .map(|entry| entry.items)
            .unwrap_or_default();

        let outcome = change(&mut items);

        if !items.is_empty() {
            sessions.entries.insert(
                self.session,
                SessionEntry {
                    items,
                    touched_at: now,
                },
            );
        }

        Ok(outcome)
    }
}
