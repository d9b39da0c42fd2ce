//! User state generator.

use crate::record::UserState;
use rand::Rng;

/// Pick one of [`UserState::ALL`] uniformly at random.
pub fn random_state<R: Rng>(rng: &mut R) -> UserState {
    UserState::ALL[rng.gen_range(0..UserState::ALL.len())]
}
