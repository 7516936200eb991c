use crate::core::error::PortalError;
use crate::models::session::SessionState;
use crate::utils::time::current_timestamp;
use dashmap::DashMap;
use uuid::Uuid;

/// Registry of live sessions keyed by session id
///
/// Each session is only ever touched through its own map entry, so two
/// sessions never share mutable state.
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionState>,
    history_capacity: usize,
}

impl SessionStore {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            history_capacity,
        }
    }

    /// Start a fresh logged-out session and return its id
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionState::new(self.history_capacity));
        id
    }

    /// Run `f` against an immutable view of the session
    ///
    /// Every access, read or write, counts as activity for idle expiry.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&SessionState) -> T,
    ) -> Result<T, PortalError> {
        let entry = self
            .sessions
            .get(&id)
            .ok_or_else(|| PortalError::SessionNotFound(id.to_string()))?;
        entry.value().touch(current_timestamp());
        Ok(f(entry.value()))
    }

    /// Like `with_session`, but fails with `NotLoggedIn` for anonymous sessions
    pub fn with_authenticated<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&SessionState) -> Result<T, PortalError>,
    ) -> Result<T, PortalError> {
        self.with_session(id, |session| {
            if !session.is_logged_in() {
                return Err(PortalError::NotLoggedIn);
            }
            f(session)
        })?
    }

    /// Run `f` with exclusive access to the session
    pub fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionState) -> Result<T, PortalError>,
    ) -> Result<T, PortalError> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| PortalError::SessionNotFound(id.to_string()))?;
        entry.value().touch(current_timestamp());
        f(entry.value_mut())
    }

    /// Like `update`, but fails with `NotLoggedIn` for anonymous sessions
    pub fn update_authenticated<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionState) -> Result<T, PortalError>,
    ) -> Result<T, PortalError> {
        self.update(id, |session| {
            if !session.is_logged_in() {
                return Err(PortalError::NotLoggedIn);
            }
            f(session)
        })
    }

    pub fn remove(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    /// Drop sessions with no request for more than `idle_timeout` seconds
    pub fn cleanup_idle(&self, idle_timeout: i64) -> usize {
        let now = current_timestamp();
        let mut removed_count = 0;

        self.sessions.retain(|_, session| {
            let keep = !session.is_idle(now, idle_timeout);
            if !keep {
                removed_count += 1;
            }
            keep
        });

        removed_count
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
