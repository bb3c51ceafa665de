//! Server-side sessions.
//!
//! The browser only holds an opaque random id in a cookie. The session data
//! (the CSRF secret and the queue of pending flashes) stays in memory on the
//! server and is lost on restart, which only costs the user a fresh token.
//!
//! A session unused for longer than the idle timeout is dropped, and the map
//! never holds more than its capacity: starting a session in a full store
//! first evicts idle ones, then the least recently seen.

use super::config::SessionConfig;
use super::csrf;
use super::flash::Flash;
use crate::libs::messages::Message;
use crate::msg_debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Length of the random session id stored in the cookie.
pub const SESSION_ID_LENGTH: usize = 40;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
struct SessionData {
    csrf_secret: String,
    flashes: Vec<Flash>,
    last_seen: Instant,
}

impl SessionData {
    fn new(now: Instant) -> Self {
        SessionData {
            csrf_secret: csrf::new_secret(),
            flashes: Vec::new(),
            last_seen: now,
        }
    }
}

/// Shared map of live sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionData>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that forgets sessions idle for `idle_timeout` and keeps at
    /// most `max_sessions` (at least one).
    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        SessionStore {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_limits(Duration::from_secs(config.idle_timeout_secs), config.max_sessions)
    }

    /// Returns a handle for `id` when that session exists and has not gone
    /// idle, otherwise starts a new session. The flag is `true` when a new
    /// session was created and its cookie must be sent.
    pub fn load_or_create(&self, id: Option<&str>) -> (Session, bool) {
        let now = Instant::now();
        let mut sessions = self.sessions.lock();

        if let Some(id) = id {
            if let Some(data) = sessions.get_mut(id) {
                if !self.is_idle(data, now) {
                    data.last_seen = now;
                    return (self.handle(id.to_string()), false);
                }
            }
            if sessions.remove(id).is_some() {
                msg_debug!(Message::SessionsEvicted(1));
            }
        }

        self.make_room(&mut sessions, now);
        let id = csrf::random_string(SESSION_ID_LENGTH);
        sessions.insert(id.clone(), SessionData::new(now));
        (self.handle(id), true)
    }

    /// Drops every session that has gone idle.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        let mut sessions = self.sessions.lock();
        self.evict_idle(&mut sessions, now);
    }

    fn is_idle(&self, data: &SessionData, now: Instant) -> bool {
        now.duration_since(data.last_seen) >= self.idle_timeout
    }

    fn evict_idle(&self, sessions: &mut HashMap<String, SessionData>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, data| !self.is_idle(data, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            msg_debug!(Message::SessionsEvicted(evicted));
        }
    }

    /// Leaves space for one more session.
    fn make_room(&self, sessions: &mut HashMap<String, SessionData>, now: Instant) {
        if sessions.len() < self.max_sessions {
            return;
        }
        self.evict_idle(sessions, now);

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, data)| data.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    msg_debug!(Message::SessionsEvicted(1));
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    fn handle(&self, id: String) -> Session {
        Session { id, store: self.clone() }
    }
}

/// Handle to one session, placed in request extensions by the session layer.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    store: SessionStore,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn csrf_secret(&self) -> Option<String> {
        self.store.sessions.lock().get(&self.id).map(|data| data.csrf_secret.clone())
    }

    /// Fresh masked token for embedding in a page.
    pub fn csrf_token(&self) -> String {
        self.csrf_secret().map(|secret| csrf::mask_secret(&secret)).unwrap_or_default()
    }

    /// Queues a notification for the next render.
    pub fn flash(&self, flash: Flash) {
        if let Some(data) = self.store.sessions.lock().get_mut(&self.id) {
            data.flashes.push(flash);
        }
    }

    /// Removes and returns every queued notification.
    pub fn take_flashes(&self) -> Vec<Flash> {
        self.store
            .sessions
            .lock()
            .get_mut(&self.id)
            .map(|data| std::mem::take(&mut data.flashes))
            .unwrap_or_default()
    }
}
