use crate::models::claim::ClaimRecord;
use std::collections::VecDeque;

/// Ordered log of predictions made in one session
///
/// Records are kept in submission order. When `capacity` is reached the
/// oldest record is evicted to make room.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    records: VecDeque<ClaimRecord>,
    capacity: usize,
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Append a record, returning the evicted one if the log was full
    pub fn append(&mut self, record: ClaimRecord) -> Option<ClaimRecord> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<ClaimRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&ClaimRecord> {
        self.records.back()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(1000)
    }
}
