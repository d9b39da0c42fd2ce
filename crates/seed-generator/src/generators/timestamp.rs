//! Post timestamp generator.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Length of the sampling window in milliseconds (365 days).
pub const WINDOW_MILLIS: i64 = 365 * 24 * 60 * 60 * 1000;

/// Generate a timestamp uniformly distributed in `(now - 365 days, now]`.
///
/// `now` is passed in so a whole batch shares one reference point.
pub fn random_date<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let offset = rng.gen_range(0..WINDOW_MILLIS);
    now - Duration::milliseconds(offset)
}
