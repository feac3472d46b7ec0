//! In-memory wizard session store with idle expiry.
//!
//! Each session remembers when it was last touched. Idle sessions are
//! dropped lazily when accessed and periodically by [`SessionStore::spawn_sweeper`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use floodwise_types::wizard::SessionState;

/// How often the background sweeper scans for idle sessions.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct TrackedSession {
    state: SessionState,
    last_touched: Instant,
}

/// Independent wizard sessions keyed by id.
pub struct SessionStore {
    sessions: DashMap<Uuid, TrackedSession>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a fresh session and return its id with a snapshot.
    pub fn create(&self) -> (Uuid, SessionState) {
        let id = Uuid::now_v7();
        let state = SessionState::new();
        self.sessions.insert(
            id,
            TrackedSession {
                state: state.clone(),
                last_touched: Instant::now(),
            },
        );
        (id, state)
    }

    /// Run `f` against one session under its entry lock and return a snapshot.
    ///
    /// Returns `None` when the session does not exist or has been idle past
    /// the TTL (it is removed in that case). A successful call refreshes the
    /// idle timer.
    pub fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Option<(R, SessionState)> {
        let now = Instant::now();
        {
            let mut entry = self.sessions.get_mut(&id)?;
            if now.duration_since(entry.last_touched) < self.ttl {
                entry.last_touched = now;
                let out = f(&mut entry.state);
                return Some((out, entry.state.clone()));
            }
        }
        // Expired: the entry guard is dropped before removing.
        self.sessions.remove(&id);
        tracing::debug!(session_id = %id, "idle session expired on access");
        None
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session idle for at least the TTL as of `now`.
    ///
    /// Returns the number of sessions removed.
    pub fn evict_idle_at(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| now.saturating_duration_since(s.last_touched) < self.ttl);
        before.saturating_sub(self.sessions.len())
    }

    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    /// Periodically evict idle sessions until the runtime shuts down.
    pub fn spawn_sweeper(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = self.evict_idle();
                if evicted > 0 {
                    tracing::info!(evicted, remaining = self.len(), "idle sessions evicted");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodwise_types::wizard::WizardPhase;

    #[test]
    fn test_sweep_evicts_idle_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, _) = store.create();
        store.create();
        assert_eq!(store.len(), 2);

        // Nothing is idle yet.
        assert_eq!(store.evict_idle(), 0);

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(store.evict_idle_at(later), 2);
        assert!(store.is_empty());
        assert!(store.update(id, |_| ()).is_none());
    }

    #[test]
    fn test_sweep_keeps_recently_touched_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (idle, _) = store.create();
        let (active, _) = store.create();

        std::thread::sleep(Duration::from_millis(50));
        store.update(active, |_| ()).unwrap();

        // `idle` crosses the TTL at this instant, `active` was touched later.
        let cutoff = Instant::now() + Duration::from_secs(60) - Duration::from_millis(25);
        assert_eq!(store.evict_idle_at(cutoff), 1);
        assert!(store.update(active, |_| ()).is_some());
        assert!(store.update(idle, |_| ()).is_none());
    }

    #[test]
    fn test_idle_session_expires_on_access() {
        let store = SessionStore::new(Duration::from_millis(10));
        let (id, _) = store.create();

        std::thread::sleep(Duration::from_millis(20));

        assert!(store.update(id, |_| ()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_returns_snapshot() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, state) = store.create();
        assert_eq!(state.phase, WizardPhase::START);

        let (out, snapshot) = store
            .update(id, |s| {
                s.phase = WizardPhase::Review;
                42
            })
            .unwrap();
        assert_eq!(out, 42);
        assert_eq!(snapshot.phase, WizardPhase::Review);
        assert!(store.remove(id));
        assert!(!store.remove(id));
    }
}
