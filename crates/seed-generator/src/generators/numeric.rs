//! Numeric value generators.

use rand::Rng;

/// Exclusive upper bound of the phone number range (10 decimal digits).
const PHONE_UPPER_BOUND: u64 = 10_000_000_000;

/// Exclusive upper bound of the like counter.
const LIKES_UPPER_BOUND: i32 = 1000;

/// Generate a uniform number in `[0, 10^10)` rendered as a zero-padded
/// 10-character decimal string.
pub fn random_phone<R: Rng>(rng: &mut R) -> String {
    let value = rng.gen_range(0..PHONE_UPPER_BOUND);
    format!("{value:010}")
}

/// Generate a like count in `[0, 1000)`.
pub fn random_likes<R: Rng>(rng: &mut R) -> i32 {
    rng.gen_range(0..LIKES_UPPER_BOUND)
}
