use chrono::{DateTime, Local, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Wall-clock time of day as "HH:MM", used to stamp claim records
pub fn clock_hhmm() -> String {
    format_hhmm(&Local::now())
}

pub fn format_hhmm<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}

pub fn elapsed_seconds(start: i64, end: i64) -> i64 {
    end - start
}
