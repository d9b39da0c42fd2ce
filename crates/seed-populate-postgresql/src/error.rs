//! Error types for the PostgreSQL populator.

use thiserror::Error;

/// Errors that can occur while seeding PostgreSQL.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// PostgreSQL connection, query or COPY error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Connection pool error.
    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Connection failure reported by a [`ConnectionProvider`] that is not
    /// backed by `tokio-postgres`.
    ///
    /// [`ConnectionProvider`]: crate::provider::ConnectionProvider
    #[error("Connection error: {0}")]
    Connection(String),

    /// The readiness gate ran out of attempts.
    #[error("Could not connect to database after {attempts} attempts")]
    DatabaseUnavailable { attempts: u32 },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
