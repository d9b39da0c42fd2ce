//! Command-line interface for bulk-seed
//!
//! Seeds PostgreSQL with synthetic `users` and `posts` rows using `COPY`.
//! Every option has a default, so running without arguments performs the
//! reference load of 100 million users and 200 million posts.
//!
//! # Usage Examples
//!
//! ```bash
//! # Reference run, connection settings from PGHOST/PGPORT/PGDATABASE/PGUSER/PGPASSWORD
//! bulk-seed
//!
//! # Smaller run with a sliding window and a metrics file
//! bulk-seed \
//!   --total-users 1000000 \
//!   --batch-size 5000 \
//!   --concurrency 20 \
//!   --throttle sliding-window \
//!   --metrics-output seed-metrics.json
//!
//! # Reproducible data, fail the process if any batch fails
//! bulk-seed --seed 42 --fail-on-batch-error
//! ```
//!
//! Logging is controlled with `RUST_LOG` and defaults to `info`.

mod populate;

use clap::Parser;
use seed_populate_postgresql::PopulateArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bulk-seed")]
#[command(about = "Seed PostgreSQL with synthetic users and posts using COPY")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    populate: PopulateArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    populate::run_populate(cli.populate).await?;
    Ok(())
}
