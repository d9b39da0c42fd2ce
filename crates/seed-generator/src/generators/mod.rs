//! Individual value generators for the generated columns.
//!
//! Every function is stateless: randomness comes from the caller's RNG and
//! derived values come from the row index.

pub mod credential;
pub mod numeric;
pub mod pattern;
pub mod state;
pub mod timestamp;
pub mod uuid;

pub use credential::random_password;
pub use numeric::{random_likes, random_phone};
pub use pattern::{post_description, post_name, user_email, user_name};
pub use state::random_state;
pub use timestamp::random_date;
pub use self::uuid::generate_user_id;
