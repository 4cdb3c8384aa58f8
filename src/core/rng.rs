//! Seeded random sources for the collision-avoiding layout.
//!
//! Every card gets its own ChaCha8 stream derived from one deck-level seed, so
//! a single card can be re-laid out without replaying the cards before it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source used by layout passes.
pub type LayoutRng = ChaCha8Rng;

const STREAM_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;

/// RNG for the whole pass when no per-card stream is needed.
pub fn seeded_rng(seed: u64) -> LayoutRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Independent, reproducible stream for one card of a deck.
pub fn card_rng(seed: u64, card_index: usize) -> LayoutRng {
    let offset = (card_index as u64).wrapping_add(1).wrapping_mul(STREAM_SPACING);
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(offset))
}
