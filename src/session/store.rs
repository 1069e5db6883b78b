//! In-memory session store keyed by player.
//!
//! The map lock is held only to find or create an entry, so first access by
//! a new player is serialized. Each session sits behind its own lock, which
//! a handler holds for the whole action: two actions for one player never
//! interleave while different players proceed independently.

use super::types::{PlayerId, Session};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to one player's session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Lock a session handle, recovering the data if a previous holder panicked.
pub fn lock_session(handle: &SessionHandle) -> MutexGuard<'_, Session> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<PlayerId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<PlayerId, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Existing session, or a fresh one in the initial state.
    pub fn get(&self, player_id: PlayerId) -> SessionHandle {
        let mut map = self.map();
        Arc::clone(map.entry(player_id).or_insert_with(|| {
            tracing::info!(player_id, "new session");
            Arc::new(Mutex::new(Session::new(player_id)))
        }))
    }

    /// Discard the player's progress and start over.
    ///
    /// The reset happens in place under the session lock, so it waits for an
    /// in-flight action to commit and then wipes it; the handle never changes.
    pub fn reset(&self, player_id: PlayerId) -> SessionHandle {
        let handle = self.get(player_id);
        *lock_session(&handle) = Session::new(player_id);
        tracing::info!(player_id, "session reset");
        handle
    }

    /// A copy of the session, if the player has one.
    pub fn snapshot(&self, player_id: PlayerId) -> Option<Session> {
        let handle = self.map().get(&player_id).cloned()?;
        let session = lock_session(&handle).clone();
        Some(session)
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.map().contains_key(&player_id)
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::GameState;
    use std::thread;

    #[test]
    fn test_get_creates_once() {
        let store = SessionStore::new();
        let a = store.get(5);
        let b = store.get(5);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_restarts_session_in_place() {
        let store = SessionStore::new();
        let first = store.get(5);
        lock_session(&first).state = GameState::GymBattle;
        let second = store.reset(5);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(lock_session(&second).state, GameState::GenRoulette);
        assert_eq!(store.snapshot(5).unwrap().state, GameState::GenRoulette);
    }

    #[test]
    fn test_reset_waits_for_in_flight_action() {
        let store = Arc::new(SessionStore::new());
        let handle = store.get(5);
        let mut guard = lock_session(&handle);

        let resetter = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.reset(5))
        };
        // The action commits while still holding the lock
        guard.state = GameState::GymBattle;
        guard.badges = 3;
        drop(guard);

        let after = resetter.join().unwrap();
        assert!(Arc::ptr_eq(&handle, &after));
        let session = store.snapshot(5).unwrap();
        assert_eq!(session.state, GameState::GenRoulette);
        assert_eq!(session.badges, 0);
    }

    #[test]
    fn test_snapshot_missing_player() {
        let store = SessionStore::new();
        assert!(store.snapshot(1).is_none());
        assert!(!store.contains(1));
    }

    #[test]
    fn test_concurrent_first_access_yields_one_session() {
        let store = Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.get(42))
            })
            .collect();
        let sessions: Vec<SessionHandle> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for s in &sessions[1..] {
            assert!(Arc::ptr_eq(&sessions[0], s));
        }
        assert_eq!(store.len(), 1);
    }
}
