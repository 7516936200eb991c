use crate::history::log::HistoryLog;
use crate::models::claim::ClaimRecord;
use crate::navigation::controller::{Navigator, Page};
use crate::utils::time::current_timestamp;
use std::sync::atomic::{AtomicI64, Ordering};

/// State of one portal session
///
/// Created logged out on the Home page with an empty history. `logout`
/// returns the session to exactly that state, history included.
#[derive(Debug)]
pub struct SessionState {
    logged_in: bool,
    current_user: Option<String>,
    navigator: Navigator,
    history: HistoryLog,
    // Unix seconds of the last request; updated through shared references
    last_seen: AtomicI64,
}

impl SessionState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            logged_in: false,
            current_user: None,
            navigator: Navigator::new(),
            history: HistoryLog::with_capacity(history_capacity),
            last_seen: AtomicI64::new(current_timestamp()),
        }
    }

    /// Start a login. A session never carries one user's page or history
    /// over to another: a live session is reset first.
    pub fn login(&mut self, username: &str) {
        if self.logged_in {
            self.logout();
        }
        self.logged_in = true;
        self.current_user = Some(username.to_string());
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.current_user = None;
        self.navigator.reset();
        self.history.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn current_page(&self) -> Page {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn record_claim(&mut self, record: ClaimRecord) -> Option<ClaimRecord> {
        self.history.append(record)
    }

    pub fn touch(&self, at: i64) {
        self.last_seen.store(at, Ordering::Relaxed);
    }

    pub fn last_seen(&self) -> i64 {
        self.last_seen.load(Ordering::Relaxed)
    }

    pub fn is_idle(&self, now: i64, idle_timeout: i64) -> bool {
        now - self.last_seen() > idle_timeout
    }
}
