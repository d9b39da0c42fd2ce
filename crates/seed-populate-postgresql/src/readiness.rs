//! Startup gate that waits for the database to accept queries.

use crate::config::ReadinessConfig;
use crate::error::LoaderError;
use crate::provider::{ConnectionProvider, CopyConnection};
use tracing::info;

/// Block until the database answers `SELECT 1`.
///
/// Tries up to `max_attempts` times, sleeping `retry_interval` after every
/// failed attempt except the last. Returns the attempt number that succeeded,
/// or [`LoaderError::DatabaseUnavailable`] once the attempts are exhausted.
///
/// No sleep follows the final failure, so an unreachable database aborts
/// after `(max_attempts - 1) * retry_interval` rather than a full extra
/// interval later.
pub async fn wait_for_database<P>(
    provider: &P,
    config: &ReadinessConfig,
) -> Result<u32, LoaderError>
where
    P: ConnectionProvider + ?Sized,
{
    for attempt in 1..=config.max_attempts {
        match probe(provider).await {
            Ok(()) => {
                info!("Database connection established");
                return Ok(attempt);
            }
            Err(e) => {
                info!(
                    "Waiting for database... ({}/{}): {}",
                    attempt, config.max_attempts, e
                );
                if attempt < config.max_attempts {
                    tokio::time::sleep(config.retry_interval).await;
                }
            }
        }
    }

    Err(LoaderError::DatabaseUnavailable {
        attempts: config.max_attempts,
    })
}

async fn probe<P>(provider: &P) -> Result<(), LoaderError>
where
    P: ConnectionProvider + ?Sized,
{
    let mut connection = provider.acquire().await?;
    connection.ping().await
}
