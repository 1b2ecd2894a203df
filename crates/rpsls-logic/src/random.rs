//! Opponent randomness
//!
//! The opponent picks uniformly among the five choices. [`SeededRng`] is a
//! deterministic xorshift generator so a match can be replayed from its
//! seed; hosts that want fresh games just seed it from entropy.

use crate::choice::{Choice, CHOICE_COUNT};

/// Source of the opponent's choice
pub trait OpponentRng {
    /// Uniform draw over the five choices
    fn next_choice(&mut self) -> Choice;
}

impl<R: OpponentRng + ?Sized> OpponentRng for &mut R {
    fn next_choice(&mut self) -> Choice {
        (**self).next_choice()
    }
}

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence of choices
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed
    pub fn new(seed: &[u8; 32]) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }

        // xorshift never leaves zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Seed from a single number, as typed on a command line
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(&bytes)
    }

    /// xorshift64*
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Unbiased value in `[0, max)`, 0 when `max` is 0
    pub fn next_below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Reject the tail that would make low values more likely
        let zone = u32::MAX - (u32::MAX % max);
        loop {
            let value = self.next_u32();
            if value < zone {
                return value % max;
            }
        }
    }
}

impl OpponentRng for SeededRng {
    fn next_choice(&mut self) -> Choice {
        let index = self.next_below(CHOICE_COUNT as u32) as u8;
        Choice::from_index(index).unwrap_or(Choice::Rock)
    }
}

/// Replays a fixed list of choices, cycling when it runs out
#[derive(Clone, Debug)]
pub struct FixedChoices {
    choices: Vec<Choice>,
    next: usize,
}

impl FixedChoices {
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices, next: 0 }
    }
}

impl OpponentRng for FixedChoices {
    fn next_choice(&mut self) -> Choice {
        if self.choices.is_empty() {
            return Choice::Rock;
        }
        let choice = self.choices[self.next % self.choices.len()];
        self.next += 1;
        choice
    }
}
