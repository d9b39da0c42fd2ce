//! PostgreSQL populator for bulk-seed.
//!
//! Seeds the `users` and `posts` tables with synthetic rows using
//! `COPY ... FROM STDIN`. The total user count is split into fixed-size
//! batches; each batch holds one pooled connection, copies its users and then
//! their posts, and reports an explicit [`BatchOutcome`]. A failed batch is
//! logged and counted but never stops the run or gets retried.
//!
//! ```text
//! Populator::run
//!   ├─ wait_for_database        (bounded retries, fatal on exhaustion)
//!   ├─ BatchPlan                (contiguous [start, end] ranges)
//!   ├─ barrier | sliding window (at most `concurrency` batches in flight)
//!   │    └─ insert_batch        (acquire → COPY users → COPY posts)
//!   └─ RunReport + provider.close()
//! ```

pub mod args;
pub mod config;
pub mod copy;
pub mod error;
pub mod loader;
pub mod plan;
pub mod populator;
pub mod provider;
pub mod readiness;
pub mod report;

pub use args::{LoadArgs, PopulateArgs, PostgreSQLArgs};
pub use config::{ConnectionConfig, LoadConfig, ReadinessConfig, ThrottleMode};
pub use error::LoaderError;
pub use loader::{insert_batch, BatchFailure, BatchOutcome, BatchStage, BatchStats};
pub use plan::{BatchPlan, BatchRange};
pub use populator::Populator;
pub use provider::{ConnectionProvider, CopyConnection, PooledConnection, PostgresProvider};
pub use readiness::wait_for_database;
pub use report::RunReport;
