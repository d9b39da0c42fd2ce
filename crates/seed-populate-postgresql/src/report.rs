//! Summary of a seeding run.

use crate::config::ThrottleMode;
use crate::loader::{BatchFailure, BatchOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Totals of a completed run. Serializes to the JSON metrics file.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total_users: u64,
    pub batch_size: u64,
    pub concurrency: usize,
    pub throttle: ThrottleMode,
    pub total_batches: u64,
    pub succeeded_batches: u64,
    pub failed_batches: u64,
    pub users_inserted: u64,
    pub posts_inserted: u64,
    pub duration_ms: u64,
    pub rows_per_second: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BatchFailure>,
}

impl RunReport {
    /// Build the report from the totals of a finished run. Failures are
    /// sorted by batch number.
    pub(crate) fn new(header: ReportHeader, started_at: DateTime<Utc>, totals: RunTotals) -> Self {
        let completed_at = Utc::now();
        let duration_ms = (completed_at - started_at).num_milliseconds().max(0) as u64;
        let rows = totals.users_inserted + totals.posts_inserted;
        let rows_per_second = if duration_ms > 0 {
            rows as f64 / (duration_ms as f64 / 1000.0)
        } else {
            0.0
        };

        let mut failures = totals.failures;
        failures.sort_by_key(|f| f.batch);

        Self {
            started_at,
            completed_at,
            total_users: header.total_users,
            batch_size: header.batch_size,
            concurrency: header.concurrency,
            throttle: header.throttle,
            total_batches: header.total_batches,
            succeeded_batches: totals.succeeded_batches,
            failed_batches: totals.failed_batches,
            users_inserted: totals.users_inserted,
            posts_inserted: totals.posts_inserted,
            duration_ms,
            rows_per_second,
            failures,
        }
    }

    /// True when every batch succeeded.
    pub fn is_success(&self) -> bool {
        self.failed_batches == 0
    }

    /// Wall-clock duration in minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration_ms as f64 / 1000.0 / 60.0
    }
}

/// Running totals of settled batches.
///
/// Successful batches are reduced to counters as they settle; only failures
/// are kept.
#[derive(Debug, Default)]
pub(crate) struct RunTotals {
    pub succeeded_batches: u64,
    pub failed_batches: u64,
    pub users_inserted: u64,
    pub posts_inserted: u64,
    pub failures: Vec<BatchFailure>,
}

impl RunTotals {
    pub fn record(&mut self, outcome: BatchOutcome) {
        match outcome {
            BatchOutcome::Succeeded(stats) => {
                self.succeeded_batches += 1;
                self.users_inserted += stats.users_inserted;
                self.posts_inserted += stats.posts_inserted;
            }
            BatchOutcome::Failed(failure) => {
                self.failed_batches += 1;
                self.failures.push(failure);
            }
        }
    }
}

/// Run parameters copied into the report.
#[derive(Debug, Clone)]
pub(crate) struct ReportHeader {
    pub total_users: u64,
    pub batch_size: u64,
    pub concurrency: usize,
    pub throttle: ThrottleMode,
    pub total_batches: u64,
}
