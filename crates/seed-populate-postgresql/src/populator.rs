//! Run orchestration: readiness check, batch dispatch, progress and report.

use crate::config::{LoadConfig, ReadinessConfig, ThrottleMode};
use crate::error::LoaderError;
use crate::loader::{insert_batch, BatchOutcome};
use crate::plan::{BatchPlan, BatchRange};
use crate::provider::ConnectionProvider;
use crate::readiness::wait_for_database;
use crate::report::{ReportHeader, RunReport, RunTotals};
use chrono::Utc;
use futures::future::join_all;
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Seeds `users` and `posts` through a [`ConnectionProvider`].
///
/// The provider is borrowed for the whole run and closed when the run ends.
///
/// # Example
///
/// ```ignore
/// let provider = PostgresProvider::new(&ConnectionConfig::default())?;
/// let report = Populator::new(&provider, LoadConfig::new(1000, 100, 5))
///     .run()
///     .await?;
/// ```
pub struct Populator<'a, P: ConnectionProvider + ?Sized> {
    provider: &'a P,
    load: LoadConfig,
    readiness: ReadinessConfig,
}

impl<'a, P: ConnectionProvider + ?Sized> Populator<'a, P> {
    pub fn new(provider: &'a P, load: LoadConfig) -> Self {
        Self {
            provider,
            load,
            readiness: ReadinessConfig::default(),
        }
    }

    /// Set the readiness gate settings.
    pub fn with_readiness(mut self, readiness: ReadinessConfig) -> Self {
        self.readiness = readiness;
        self
    }

    /// Run the whole seed and close the provider.
    ///
    /// Only an invalid configuration or an exhausted readiness gate return an
    /// error. Failed batches are counted in the report and the run goes on.
    pub async fn run(&self) -> Result<RunReport, LoaderError> {
        let result = self.run_inner().await;
        self.provider.close();
        result
    }

    async fn run_inner(&self) -> Result<RunReport, LoaderError> {
        self.load.validate()?;
        self.readiness.validate()?;

        info!("Starting bulk insert process...");
        info!(
            "Target: {} users, {} posts",
            self.load.total_users,
            self.load.total_users.saturating_mul(2)
        );
        info!(
            "Config: {} users per batch, {} concurrent batches ({} throttling)",
            self.load.batch_size, self.load.concurrency, self.load.throttle
        );

        let started_at = Utc::now();
        let started = Instant::now();

        wait_for_database(self.provider, &self.readiness).await?;

        let plan = BatchPlan::new(self.load.total_users, self.load.batch_size);
        let progress = ProgressTracker::new(plan.total_batches(), started);

        let totals = match self.load.throttle {
            ThrottleMode::Barrier => self.dispatch_barrier(plan, &progress).await,
            ThrottleMode::SlidingWindow => self.dispatch_sliding_window(plan, &progress).await,
        };

        let report = RunReport::new(
            ReportHeader {
                total_users: self.load.total_users,
                batch_size: self.load.batch_size,
                concurrency: self.load.concurrency,
                throttle: self.load.throttle,
                total_batches: progress.total(),
            },
            started_at,
            totals,
        );

        info!(
            "Bulk insert completed ({} of {} batches succeeded)",
            report.succeeded_batches, report.total_batches
        );
        if !report.is_success() {
            warn!(
                "{} batch(es) failed; their rows may be partially written",
                report.failed_batches
            );
        }
        info!("Total time: {:.1} minutes", report.duration_minutes());
        info!(
            "Final count: {} users, {} posts",
            report.users_inserted, report.posts_inserted
        );

        Ok(report)
    }

    /// Dispatch groups of `concurrency` batches and wait for each whole group.
    async fn dispatch_barrier(&self, plan: BatchPlan, progress: &ProgressTracker) -> RunTotals {
        let mut totals = RunTotals::default();
        let mut group = Vec::new();

        for batch in plan {
            group.push(self.run_batch(batch, progress));
            if group.len() >= self.load.concurrency {
                for outcome in join_all(group.drain(..)).await {
                    totals.record(outcome);
                }
            }
        }
        for outcome in join_all(group).await {
            totals.record(outcome);
        }
        totals
    }

    /// Keep up to `concurrency` batches running at all times.
    async fn dispatch_sliding_window(
        &self,
        plan: BatchPlan,
        progress: &ProgressTracker,
    ) -> RunTotals {
        futures::stream::iter(plan)
            .map(|batch| self.run_batch(batch, progress))
            .buffer_unordered(self.load.concurrency)
            .fold(RunTotals::default(), |mut totals, outcome| async move {
                totals.record(outcome);
                totals
            })
            .await
    }

    async fn run_batch(&self, batch: BatchRange, progress: &ProgressTracker) -> BatchOutcome {
        let outcome = insert_batch(self.provider, batch, self.load.seed).await;
        progress.record(&outcome);
        outcome
    }
}

/// Counts settled batches and logs progress.
struct ProgressTracker {
    total: u64,
    completed: AtomicU64,
    failed: AtomicU64,
    started: Instant,
}

impl ProgressTracker {
    fn new(total: u64, started: Instant) -> Self {
        Self {
            total,
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started,
        }
    }

    fn total(&self) -> u64 {
        self.total
    }

    fn record(&self, outcome: &BatchOutcome) {
        let failed = if outcome.is_success() {
            self.failed.load(Ordering::Relaxed)
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed) + 1
        };
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let elapsed_minutes = self.started.elapsed().as_secs_f64() / 60.0;

        if failed == 0 {
            info!(
                "Progress: {}/{} batches ({:.1}%) - {:.1}min elapsed",
                completed,
                self.total,
                percent(completed, self.total),
                elapsed_minutes
            );
        } else {
            info!(
                "Progress: {}/{} batches ({:.1}%, {} failed) - {:.1}min elapsed",
                completed,
                self.total,
                percent(completed, self.total),
                failed,
                elapsed_minutes
            );
        }
    }
}

fn percent(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed as f64 / total as f64 * 100.0
}
