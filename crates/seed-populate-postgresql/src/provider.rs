//! Connection provider abstraction and its PostgreSQL pool implementation.

use crate::config::ConnectionConfig;
use crate::error::LoaderError;
use async_trait::async_trait;
use bytes::Bytes;
use deadpool_postgres::{ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use futures::SinkExt;
use tokio_postgres::NoTls;
use tracing::debug;

/// A connection able to answer a liveness probe and accept COPY data.
#[async_trait]
pub trait CopyConnection: Send {
    /// Run a trivial query.
    async fn ping(&mut self) -> Result<(), LoaderError>;

    /// Stream `payload` (COPY text format) through `statement` and wait for
    /// the server to acknowledge it. Returns the number of rows copied.
    async fn copy_in(&mut self, statement: &str, payload: Bytes) -> Result<u64, LoaderError>;
}

/// Hands out one connection per operation.
///
/// Connections go back to the provider when dropped, so every exit path of a
/// caller releases what it acquired.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Connection: CopyConnection;

    /// Wait for a connection to become available.
    async fn acquire(&self) -> Result<Self::Connection, LoaderError>;

    /// Stop handing out connections and release idle ones.
    fn close(&self);
}

/// Pooled PostgreSQL connections backed by `deadpool-postgres`.
pub struct PostgresProvider {
    pool: Pool,
}

impl PostgresProvider {
    /// Build the pool. No connection is opened until the first acquire.
    pub fn new(config: &ConnectionConfig) -> Result<Self, LoaderError> {
        if config.pool_size == 0 {
            return Err(LoaderError::Config("pool size must be at least 1".to_string()));
        }

        let mut pg_config = deadpool_postgres::Config::new();
        pg_config.host = Some(config.host.clone());
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database.clone());
        pg_config.user = Some(config.user.clone());
        pg_config.password = Some(config.password.clone());
        pg_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        pg_config.pool = Some(PoolConfig::new(config.pool_size));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| LoaderError::Config(format!("failed to build connection pool: {e}")))?;

        debug!("Connection pool created (max size {})", config.pool_size);
        Ok(Self { pool })
    }
}

#[async_trait]
impl ConnectionProvider for PostgresProvider {
    type Connection = PooledConnection;

    async fn acquire(&self) -> Result<PooledConnection, LoaderError> {
        let client = self.pool.get().await?;
        Ok(PooledConnection(client))
    }

    fn close(&self) {
        self.pool.close();
    }
}

/// A connection checked out of [`PostgresProvider`].
pub struct PooledConnection(deadpool_postgres::Object);

#[async_trait]
impl CopyConnection for PooledConnection {
    async fn ping(&mut self) -> Result<(), LoaderError> {
        self.0.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn copy_in(&mut self, statement: &str, payload: Bytes) -> Result<u64, LoaderError> {
        let sink = self.0.copy_in::<_, Bytes>(statement).await?;
        futures::pin_mut!(sink);
        sink.send(payload).await?;
        let rows = sink.finish().await?;
        Ok(rows)
    }
}
