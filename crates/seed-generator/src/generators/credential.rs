//! Placeholder password generator.
//!
//! The output is a short base-36 string drawn from a non-cryptographic RNG.
//! It only fills the `password` column with something that looks plausible.

use rand::Rng;

/// Number of characters kept from the rendered value.
pub const PASSWORD_LENGTH: usize = 8;

const RADIX: u64 = 36;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random value, render it in base 36 and keep the trailing
/// [`PASSWORD_LENGTH`] characters.
pub fn random_password<R: Rng>(rng: &mut R) -> String {
    // Values below 36^8 would render with fewer than 8 digits.
    let min = RADIX.pow(PASSWORD_LENGTH as u32);
    let rendered = to_base36(rng.gen_range(min..=u64::MAX));
    rendered[rendered.len() - PASSWORD_LENGTH..].to_string()
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(DIGITS[(value % RADIX) as usize]);
        value /= RADIX;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
