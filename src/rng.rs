//! Deterministic random sources.
//!
//! Every random draw in a game goes through [`Rand`]. Production games use
//! [`GameRand::Seeded`], a ChaCha8 stream derived from the game seed and the
//! turn number, so replaying a game with the same seed reproduces every food
//! spawn and placement. Tests pin behaviour with [`FixedRand`].

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of random integers and shuffles.
pub trait Rand {
    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn intn(&mut self, n: usize) -> usize;

    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.intn(i + 1);
            items.swap(i, j);
        }
    }
}

/// Rand that always returns the same extreme and never reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedRand {
    /// `intn(n)` is always 0
    Min,
    /// `intn(n)` is always `n - 1`
    Max,
}

impl Rand for FixedRand {
    fn intn(&mut self, n: usize) -> usize {
        match self {
            FixedRand::Min => 0,
            FixedRand::Max => n.saturating_sub(1),
        }
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

/// Random source handed out by `Settings::get_rand`.
#[derive(Debug, Clone)]
pub enum GameRand {
    Seeded(ChaCha8Rng),
    Fixed(FixedRand),
}

impl GameRand {
    /// Stream for one (seed, turn) pair.
    pub fn for_turn(seed: i64, turn: i32) -> Self {
        let turn_seed = seed.wrapping_add(i64::from(turn) + 1);
        GameRand::Seeded(ChaCha8Rng::seed_from_u64(turn_seed as u64))
    }
}

impl Rand for GameRand {
    fn intn(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        match self {
            GameRand::Seeded(rng) => rng.random_range(0..n),
            GameRand::Fixed(fixed) => fixed.intn(n),
        }
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        match self {
            GameRand::Seeded(rng) => items.shuffle(rng),
            GameRand::Fixed(fixed) => fixed.shuffle(items),
        }
    }
}
