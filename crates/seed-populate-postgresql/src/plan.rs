//! Partitioning of the user index range into batches.

use std::ops::RangeInclusive;

/// A contiguous range of sequential user indices processed as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    /// 1-based batch number.
    pub number: u64,
    /// First user index, inclusive.
    pub start: u64,
    /// Last user index, inclusive.
    pub end: u64,
}

impl BatchRange {
    /// Number of users in the batch.
    pub fn user_count(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn indices(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl std::fmt::Display for BatchRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "batch {} ({}-{})", self.number, self.start, self.end)
    }
}

/// `ceil(total_users / batch_size)`; zero when `batch_size` is zero.
pub fn total_batches(total_users: u64, batch_size: u64) -> u64 {
    if batch_size == 0 {
        return 0;
    }
    total_users.div_ceil(batch_size)
}

/// Iterator over the batches covering `[1, total_users]`.
///
/// Every batch holds `batch_size` users except possibly the last.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    total_users: u64,
    batch_size: u64,
    next_start: u64,
    next_number: u64,
}

impl BatchPlan {
    pub fn new(total_users: u64, batch_size: u64) -> Self {
        Self {
            total_users,
            batch_size,
            next_start: 1,
            next_number: 1,
        }
    }

    pub fn total_batches(&self) -> u64 {
        total_batches(self.total_users, self.batch_size)
    }
}

impl Iterator for BatchPlan {
    type Item = BatchRange;

    fn next(&mut self) -> Option<Self::Item> {
        if self.batch_size == 0 || self.next_start > self.total_users {
            return None;
        }
        let start = self.next_start;
        let end = start
            .saturating_add(self.batch_size - 1)
            .min(self.total_users);
        let batch = BatchRange {
            number: self.next_number,
            start,
            end,
        };
        self.next_start = end + 1;
        self.next_number += 1;
        Some(batch)
    }
}
