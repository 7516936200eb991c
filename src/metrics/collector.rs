use crate::stores::session_store::SessionStore;
use crate::utils::time::{current_timestamp, elapsed_seconds};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Portal-wide counters
pub struct Metrics {
    pub successful_logins: AtomicU64,
    pub failed_logins: AtomicU64,
    pub registrations: AtomicU64,
    pub successful_predictions: AtomicU64,
    pub failed_predictions: AtomicU64,
    pub fallback_predictions: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub successful_logins: u64,
    pub failed_logins: u64,
    pub login_success_rate: f64,
    pub registrations: u64,
    pub successful_predictions: u64,
    pub failed_predictions: u64,
    pub fallback_predictions: u64,
    pub active_sessions: usize,
    pub uptime_seconds: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            successful_logins: AtomicU64::new(0),
            failed_logins: AtomicU64::new(0),
            registrations: AtomicU64::new(0),
            successful_predictions: AtomicU64::new(0),
            failed_predictions: AtomicU64::new(0),
            fallback_predictions: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }


    pub fn record_login(&self, success: bool) {
        if success {
            self.successful_logins.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_logins.fetch_add(1, Ordering::Relaxed);
        }
    }


    pub fn increment_registrations(&self) {
        self.registrations.fetch_add(1, Ordering::Relaxed);
    }


    pub fn record_prediction(&self, success: bool, fell_back: bool) {
        if success {
            self.successful_predictions.fetch_add(1, Ordering::Relaxed);
            if fell_back {
                self.fallback_predictions.fetch_add(1, Ordering::Relaxed);
            }
        } else {
            self.failed_predictions.fetch_add(1, Ordering::Relaxed);
        }
    }


    /// Collects counters and derives login_success_rate and uptime_seconds.
    pub fn get_snapshot(&self, sessions: &SessionStore) -> MetricsSnapshot {
        let successful_logins = self.successful_logins.load(Ordering::Relaxed);
        let failed_logins = self.failed_logins.load(Ordering::Relaxed);

        let attempts = successful_logins + failed_logins;
        let login_success_rate = if attempts > 0 {
            (successful_logins as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            successful_logins,
            failed_logins,
            login_success_rate,
            registrations: self.registrations.load(Ordering::Relaxed),
            successful_predictions: self.successful_predictions.load(Ordering::Relaxed),
            failed_predictions: self.failed_predictions.load(Ordering::Relaxed),
            fallback_predictions: self.fallback_predictions.load(Ordering::Relaxed),
            active_sessions: sessions.len(),
            uptime_seconds: elapsed_seconds(self.start_time, current_timestamp()),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
