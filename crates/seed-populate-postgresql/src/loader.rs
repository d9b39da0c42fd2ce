//! Loading of a single batch through the COPY channels.

use crate::copy::{encode_posts, encode_users, POSTS_COPY_STATEMENT, USERS_COPY_STATEMENT};
use crate::error::LoaderError;
use crate::plan::BatchRange;
use crate::provider::{ConnectionProvider, CopyConnection};
use seed_generator::BatchGenerator;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Step of a batch that was running when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStage {
    /// Waiting for a pooled connection.
    Acquire,
    /// Copying the `users` rows.
    Users,
    /// Copying the `posts` rows. The batch's users are already committed.
    Posts,
}

impl std::fmt::Display for BatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStage::Acquire => write!(f, "acquire"),
            BatchStage::Users => write!(f, "users"),
            BatchStage::Posts => write!(f, "posts"),
        }
    }
}

/// Counts for a batch that completed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStats {
    pub batch: BatchRange,
    pub users_inserted: u64,
    pub posts_inserted: u64,
    pub duration: Duration,
}

/// A batch that failed. Nothing it wrote before `stage` is rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub batch: u64,
    pub start: u64,
    pub end: u64,
    pub stage: BatchStage,
    pub reason: String,
}

/// Result of loading one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Succeeded(BatchStats),
    Failed(BatchFailure),
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Succeeded(_))
    }
}

/// Generate and copy the users of `batch`, then their posts.
///
/// One connection is held for both COPY phases and released on every exit
/// path. Errors never escape: they are logged with the batch number and
/// returned as [`BatchOutcome::Failed`].
pub async fn insert_batch<P>(provider: &P, batch: BatchRange, seed: Option<u64>) -> BatchOutcome
where
    P: ConnectionProvider + ?Sized,
{
    let started = Instant::now();

    match load(provider, batch, seed).await {
        Ok((users_inserted, posts_inserted)) => {
            info!(
                "Batch {} completed: Inserted {} users ({}-{}) and {} posts",
                batch.number, users_inserted, batch.start, batch.end, posts_inserted
            );
            BatchOutcome::Succeeded(BatchStats {
                batch,
                users_inserted,
                posts_inserted,
                duration: started.elapsed(),
            })
        }
        Err((stage, e)) => {
            error!("Error in batch {} ({} stage): {}", batch.number, stage, e);
            BatchOutcome::Failed(BatchFailure {
                batch: batch.number,
                start: batch.start,
                end: batch.end,
                stage,
                reason: e.to_string(),
            })
        }
    }
}

async fn load<P>(
    provider: &P,
    batch: BatchRange,
    seed: Option<u64>,
) -> Result<(u64, u64), (BatchStage, LoaderError)>
where
    P: ConnectionProvider + ?Sized,
{
    let mut connection = provider
        .acquire()
        .await
        .map_err(|e| (BatchStage::Acquire, e))?;

    let mut generator = BatchGenerator::for_batch(seed, batch.number);

    let users = generator.users(batch.indices());
    let users_inserted = connection
        .copy_in(USERS_COPY_STATEMENT, encode_users(&users))
        .await
        .map_err(|e| (BatchStage::Users, e))?;
    debug!("{}: {} user rows copied", batch, users_inserted);

    let posts = generator.posts(&users);
    let posts_inserted = connection
        .copy_in(POSTS_COPY_STATEMENT, encode_posts(&posts))
        .await
        .map_err(|e| (BatchStage::Posts, e))?;
    debug!("{}: {} post rows copied", batch, posts_inserted);

    Ok((users_inserted, posts_inserted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(BatchStage::Acquire.to_string(), "acquire");
        assert_eq!(BatchStage::Posts.to_string(), "posts");
    }

    #[test]
    fn test_outcome_is_success() {
        let batch = BatchRange {
            number: 1,
            start: 1,
            end: 10,
        };
        let ok = BatchOutcome::Succeeded(BatchStats {
            batch,
            users_inserted: 10,
            posts_inserted: 20,
            duration: Duration::from_millis(5),
        });
        let failed = BatchOutcome::Failed(BatchFailure {
            batch: 1,
            start: 1,
            end: 10,
            stage: BatchStage::Users,
            reason: "boom".to_string(),
        });
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }
}
