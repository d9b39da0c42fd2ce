//! In-memory connection provider used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use seed_populate_postgresql::copy::{POSTS_COPY_STATEMENT, USERS_COPY_STATEMENT};
use seed_populate_postgresql::{ConnectionProvider, CopyConnection, LoaderError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Table a COPY targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Posts,
}

/// COPY lifecycle step, keyed by the first user index of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyEvent {
    Started { first_user: u64, table: Table },
    Finished { first_user: u64, table: Table },
}

/// Rows and counters shared by a provider and its connections.
#[derive(Default)]
pub struct MemoryState {
    pub user_rows: Mutex<Vec<String>>,
    pub post_rows: Mutex<Vec<String>>,
    pub connect_attempts: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub post_copies: AtomicUsize,
    pub closed: AtomicBool,
    pub events: Mutex<Vec<CopyEvent>>,
}

/// Provider that keeps COPY payloads in memory.
pub struct MemoryProvider {
    pub state: Arc<MemoryState>,
    unreachable_attempts: usize,
    fail_post_copy: Option<usize>,
    slow_posts: Option<(u64, Duration)>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            state: Arc::new(MemoryState::default()),
            unreachable_attempts: 0,
            fail_post_copy: None,
            slow_posts: None,
        }
    }

    /// Refuse the first `attempts` connection attempts.
    pub fn unreachable_for(mut self, attempts: usize) -> Self {
        self.unreachable_attempts = attempts;
        self
    }

    /// Reject the `n`-th posts COPY (1-based) as a malformed payload.
    pub fn failing_post_copy(mut self, n: usize) -> Self {
        self.fail_post_copy = Some(n);
        self
    }

    /// Hold the posts COPY of the batch starting at `first_user` for `delay`.
    pub fn slow_posts_for(mut self, first_user: u64, delay: Duration) -> Self {
        self.slow_posts = Some((first_user, delay));
        self
    }

    pub fn events(&self) -> Vec<CopyEvent> {
        self.state.events.lock().unwrap().clone()
    }

    /// Position of `event` in the COPY log.
    pub fn position(&self, event: CopyEvent) -> usize {
        self.events()
            .iter()
            .position(|e| *e == event)
            .unwrap_or_else(|| panic!("{event:?} never happened"))
    }

    pub fn users(&self) -> Vec<Vec<String>> {
        split_rows(&self.state.user_rows.lock().unwrap())
    }

    pub fn posts(&self) -> Vec<Vec<String>> {
        split_rows(&self.state.post_rows.lock().unwrap())
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn connect_attempts(&self) -> usize {
        self.state.connect_attempts.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn split_rows(rows: &[String]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.split('\t').map(str::to_string).collect())
        .collect()
}

#[async_trait]
impl ConnectionProvider for MemoryProvider {
    type Connection = MemoryConnection;

    async fn acquire(&self) -> Result<MemoryConnection, LoaderError> {
        let attempt = self.state.connect_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.unreachable_attempts {
            return Err(LoaderError::Connection("connection refused".to_string()));
        }

        let in_flight = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        Ok(MemoryConnection {
            state: Arc::clone(&self.state),
            fail_post_copy: self.fail_post_copy,
            slow_posts: self.slow_posts,
            first_user: None,
        })
    }

    fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }
}

pub struct MemoryConnection {
    state: Arc<MemoryState>,
    fail_post_copy: Option<usize>,
    slow_posts: Option<(u64, Duration)>,
    first_user: Option<u64>,
}

impl MemoryConnection {
    fn log(&self, event: CopyEvent) {
        self.state.events.lock().unwrap().push(event);
    }
}

fn first_user_index(rows: &[String]) -> Option<u64> {
    rows.first()?
        .split('\t')
        .nth(1)?
        .strip_prefix("User_")?
        .parse()
        .ok()
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CopyConnection for MemoryConnection {
    async fn ping(&mut self) -> Result<(), LoaderError> {
        Ok(())
    }

    async fn copy_in(&mut self, statement: &str, payload: Bytes) -> Result<u64, LoaderError> {
        // Let the other batches of the group reach this point too.
        tokio::task::yield_now().await;

        let text = String::from_utf8(payload.to_vec())
            .map_err(|e| LoaderError::Connection(e.to_string()))?;
        let rows: Vec<String> = text.lines().map(str::to_string).collect();
        let count = rows.len() as u64;

        if statement == USERS_COPY_STATEMENT {
            let first_user = first_user_index(&rows).unwrap_or(0);
            self.first_user = Some(first_user);
            let table = Table::Users;
            self.log(CopyEvent::Started { first_user, table });
            self.state.user_rows.lock().unwrap().extend(rows);
            self.log(CopyEvent::Finished { first_user, table });
        } else if statement == POSTS_COPY_STATEMENT {
            let first_user = self.first_user.unwrap_or(0);
            let table = Table::Posts;
            self.log(CopyEvent::Started { first_user, table });
            if let Some((slow_user, delay)) = self.slow_posts {
                if slow_user == first_user {
                    tokio::time::sleep(delay).await;
                }
            }

            let copy = self.state.post_copies.fetch_add(1, Ordering::SeqCst) + 1;
            if Some(copy) == self.fail_post_copy {
                return Err(LoaderError::Connection(
                    "invalid input syntax for type uuid".to_string(),
                ));
            }
            self.state.post_rows.lock().unwrap().extend(rows);
            self.log(CopyEvent::Finished { first_user, table });
        } else {
            return Err(LoaderError::Connection(format!("unexpected statement: {statement}")));
        }
        Ok(count)
    }
}
