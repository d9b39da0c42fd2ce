//! CLI argument definitions for the PostgreSQL populator.

use crate::config::{ConnectionConfig, LoadConfig, ReadinessConfig, ThrottleMode};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// PostgreSQL connection arguments, read from the standard `PG*` variables.
#[derive(Args, Clone, Debug)]
pub struct PostgreSQLArgs {
    /// Database host
    #[arg(long, env = "PGHOST", default_value = "postgres")]
    pub host: String,

    /// Database port
    #[arg(long, env = "PGPORT", default_value = "5432")]
    pub port: u16,

    /// Database name
    #[arg(long, env = "PGDATABASE", default_value = "yourdb")]
    pub database: String,

    /// Database user
    #[arg(long, env = "PGUSER", default_value = "youruser")]
    pub user: String,

    /// Database password
    #[arg(
        long,
        env = "PGPASSWORD",
        default_value = "yourpassword",
        hide_env_values = true
    )]
    pub password: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "SEED_POOL_SIZE", default_value = "10")]
    pub pool_size: usize,
}

impl PostgreSQLArgs {
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            pool_size: self.pool_size,
        }
    }
}

/// Arguments controlling batching, concurrency and startup retries.
#[derive(Args, Clone, Debug)]
pub struct LoadArgs {
    /// Number of users to insert (each user gets 2 posts)
    #[arg(long, env = "SEED_TOTAL_USERS", default_value = "100000000")]
    pub total_users: u64,

    /// Users per batch
    #[arg(long, env = "SEED_BATCH_SIZE", default_value = "10000")]
    pub batch_size: u64,

    /// Maximum number of batches in flight
    #[arg(long, env = "SEED_CONCURRENCY", default_value = "100")]
    pub concurrency: usize,

    /// Batch admission once the concurrency cap is reached
    #[arg(long, env = "SEED_THROTTLE", value_enum, default_value_t = ThrottleMode::Barrier)]
    pub throttle: ThrottleMode,

    /// Random seed for reproducible data (entropy when omitted)
    #[arg(long, env = "SEED_RANDOM_SEED")]
    pub seed: Option<u64>,

    /// Connection attempts before giving up on the database
    #[arg(long, env = "SEED_MAX_CONNECT_ATTEMPTS", default_value = "30")]
    pub max_connect_attempts: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, env = "SEED_CONNECT_RETRY_INTERVAL_SECS", default_value = "2")]
    pub connect_retry_interval_secs: u64,
}

impl LoadArgs {
    pub fn load_config(&self) -> LoadConfig {
        LoadConfig::new(self.total_users, self.batch_size, self.concurrency)
            .with_throttle(self.throttle)
            .with_seed(self.seed)
    }

    pub fn readiness_config(&self) -> ReadinessConfig {
        ReadinessConfig {
            max_attempts: self.max_connect_attempts,
            retry_interval: Duration::from_secs(self.connect_retry_interval_secs),
        }
    }
}

/// Everything the populate run accepts.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    #[command(flatten)]
    pub postgresql: PostgreSQLArgs,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Exit with an error when any batch failed
    #[arg(long, env = "SEED_FAIL_ON_BATCH_ERROR")]
    pub fail_on_batch_error: bool,

    /// Write the run report as JSON to this path
    #[arg(long, env = "SEED_METRICS_OUTPUT")]
    pub metrics_output: Option<PathBuf>,
}
