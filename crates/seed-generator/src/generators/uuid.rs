//! User id generator.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Generate a random UUID v4 using the provided RNG.
pub fn generate_user_id<R: Rng>(rng: &mut R) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    // Sets the version (4) and RFC 4122 variant bits
    Builder::from_random_bytes(bytes).into_uuid()
}
