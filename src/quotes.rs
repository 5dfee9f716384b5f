use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::QUOTES;

/// Picks the header quote for a session.
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or_default()
}
