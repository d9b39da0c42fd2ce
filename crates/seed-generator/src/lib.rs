//! Synthetic record generator for bulk-seed.
//!
//! This crate produces the fake `users` and `posts` rows that bulk-seed streams
//! into PostgreSQL. Field values come from small pure functions in
//! [`generators`], and [`BatchGenerator`] assembles them into the records of a
//! single batch.
//!
//! # Architecture
//!
//! ```text
//!   batch number + optional seed
//!              │
//!              ▼
//!   ┌────────────────────┐
//!   │   BatchGenerator   │
//!   │                    │
//!   │  - rng (StdRng)    │
//!   │  - now             │
//!   └─────────┬──────────┘
//!             │ users(start..=end)
//!             ▼
//!     Vec<UserRecord> ──posts(&users)──▶ Vec<PostRecord> (2 per user)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_generator::{BatchGenerator, POSTS_PER_USER};
//!
//! let mut generator = BatchGenerator::for_batch(Some(42), 1);
//! let users = generator.users(1..=10);
//! let posts = generator.posts(&users);
//!
//! assert_eq!(users[0].name, "User_1");
//! assert_eq!(posts.len(), users.len() * POSTS_PER_USER);
//! ```
//!
//! The password generator uses a non-cryptographic RNG and a narrow output
//! distribution. Its values are placeholders and must never be used as real
//! credentials.

pub mod generator;
pub mod generators;
pub mod record;

// Re-exports for convenience
pub use generator::{BatchGenerator, POSTS_PER_USER};
pub use record::{PostRecord, UserRecord, UserState};
