//! Populate command runner.

use anyhow::Context;
use seed_populate_postgresql::{PopulateArgs, Populator, PostgresProvider, RunReport};
use std::path::Path;

use super::mask_connection_password;

/// Seed PostgreSQL with synthetic users and posts.
///
/// Returns an error only when the run cannot start or reach the database, or
/// when `--fail-on-batch-error` is set and a batch failed.
pub async fn run_populate(args: PopulateArgs) -> anyhow::Result<RunReport> {
    let connection = args.postgresql.connection_config();
    tracing::info!(
        "Connecting to {} (pool size {})",
        mask_connection_password(&connection.connection_url()),
        connection.pool_size
    );

    let provider =
        PostgresProvider::new(&connection).context("Failed to create PostgreSQL pool")?;

    let report = Populator::new(&provider, args.load.load_config())
        .with_readiness(args.load.readiness_config())
        .run()
        .await
        .context("Bulk insert aborted")?;

    if let Some(path) = &args.metrics_output {
        write_metrics(path, &report)?;
        tracing::info!("Wrote run metrics to {}", path.display());
    }

    if args.fail_on_batch_error && !report.is_success() {
        anyhow::bail!(
            "{} of {} batches failed",
            report.failed_batches,
            report.total_batches
        );
    }

    Ok(report)
}

/// Write the run report as pretty-printed JSON.
fn write_metrics(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run metrics")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run metrics to {}", path.display()))?;
    Ok(())
}
