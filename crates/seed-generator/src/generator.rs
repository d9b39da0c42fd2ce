//! Per-batch record generation.

use crate::generators::{
    generate_user_id, post_description, post_name, random_date, random_likes, random_password,
    random_phone, random_state, user_email, user_name,
};
use crate::record::{PostRecord, UserRecord};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::RangeInclusive;

/// Number of posts generated for every user.
pub const POSTS_PER_USER: usize = 2;

/// Mixes the batch number into the run seed so batches draw distinct streams.
const BATCH_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generates the users and posts of one batch.
///
/// A generator owns its RNG, so batches running concurrently never share
/// random state.
pub struct BatchGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl BatchGenerator {
    /// Create a generator from an explicit RNG and reference time.
    pub fn new(rng: StdRng, now: DateTime<Utc>) -> Self {
        Self { rng, now }
    }

    /// Create the generator for `batch_number`.
    ///
    /// With a run seed the output is reproducible per batch no matter in which
    /// order batches run; without one the RNG is seeded from OS entropy.
    pub fn for_batch(seed: Option<u64>, batch_number: u64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ batch_number.wrapping_mul(BATCH_SEED_MIX)),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, Utc::now())
    }

    /// Generate one user per sequential index in `indices`.
    pub fn users(&mut self, indices: RangeInclusive<u64>) -> Vec<UserRecord> {
        indices.map(|index| self.user(index)).collect()
    }

    /// Generate a single user for sequential index `index`.
    pub fn user(&mut self, index: u64) -> UserRecord {
        UserRecord {
            id: generate_user_id(&mut self.rng),
            index,
            name: user_name(index),
            email: user_email(index),
            password: random_password(&mut self.rng),
            phone_number: random_phone(&mut self.rng),
            state: random_state(&mut self.rng),
        }
    }

    /// Generate [`POSTS_PER_USER`] posts for each user, in user order.
    pub fn posts(&mut self, users: &[UserRecord]) -> Vec<PostRecord> {
        let mut posts = Vec::with_capacity(users.len() * POSTS_PER_USER);
        for user in users {
            for ordinal in 1..=POSTS_PER_USER {
                posts.push(PostRecord {
                    user_id: user.id,
                    name: post_name(ordinal),
                    description: post_description(ordinal),
                    date: random_date(&mut self.rng, self.now),
                    number_of_likes: random_likes(&mut self.rng),
                });
            }
        }
        posts
    }
}
