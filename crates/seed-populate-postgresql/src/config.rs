//! Configuration types for a seeding run.

use crate::error::LoaderError;
use clap::ValueEnum;
use serde::Serialize;
use std::time::Duration;

/// How batches are admitted once the concurrency cap is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThrottleMode {
    /// Dispatch a group of `concurrency` batches and wait for every one of
    /// them before dispatching the next group.
    #[default]
    Barrier,
    /// Keep up to `concurrency` batches in flight, starting a new batch as
    /// soon as any running one settles.
    SlidingWindow,
}

impl std::fmt::Display for ThrottleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThrottleMode::Barrier => write!(f, "barrier"),
            ThrottleMode::SlidingWindow => write!(f, "sliding-window"),
        }
    }
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Maximum number of pooled connections.
    pub pool_size: usize,
}

impl ConnectionConfig {
    /// Connection URL including the password. Mask it before logging.
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "postgres".to_string(),
            port: 5432,
            database: "yourdb".to_string(),
            user: "youruser".to_string(),
            password: "yourpassword".to_string(),
            pool_size: 10,
        }
    }
}

/// Settings of the batched load.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Number of users to insert; posts are twice as many.
    pub total_users: u64,
    /// Users per batch.
    pub batch_size: u64,
    /// Maximum number of batches in flight.
    pub concurrency: usize,
    pub throttle: ThrottleMode,
    /// Run seed for reproducible data. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl LoadConfig {
    /// Create a load configuration with barrier throttling and no seed.
    pub fn new(total_users: u64, batch_size: u64, concurrency: usize) -> Self {
        Self {
            total_users,
            batch_size,
            concurrency,
            throttle: ThrottleMode::Barrier,
            seed: None,
        }
    }

    /// Set the throttling discipline.
    pub fn with_throttle(mut self, throttle: ThrottleMode) -> Self {
        self.throttle = throttle;
        self
    }

    /// Set the run seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// `ceil(total_users / batch_size)`
    pub fn total_batches(&self) -> u64 {
        crate::plan::total_batches(self.total_users, self.batch_size)
    }

    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.total_users == 0 {
            return Err(LoaderError::Config("total users must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(LoaderError::Config("batch size must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(LoaderError::Config("concurrency must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self::new(100_000_000, 10_000, 100)
    }
}

/// Settings of the startup readiness check.
#[derive(Debug, Clone)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    /// Delay after each failed attempt except the last.
    pub retry_interval: Duration,
}

impl ReadinessConfig {
    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.max_attempts == 0 {
            return Err(LoaderError::Config("max connect attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            retry_interval: Duration::from_secs(2),
        }
    }
}
