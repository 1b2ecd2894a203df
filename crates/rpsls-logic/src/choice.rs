//! Choices and round outcomes

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Number of symbols in the cyclic order
pub const CHOICE_COUNT: u8 = 5;

/// A symbol a player can throw.
///
/// Discriminants follow the cyclic order used by [`crate::resolve`]:
/// each choice beats the ones 1 and 3 steps behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
    Lizard = 3,
    Spock = 4,
}

impl Choice {
    /// All choices in scan order
    pub const ALL: [Choice; 5] = [
        Choice::Rock,
        Choice::Paper,
        Choice::Scissors,
        Choice::Lizard,
        Choice::Spock,
    ];

    /// Build a choice from its index in the cyclic order
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Index in the cyclic order (0-4)
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
            Choice::Lizard => "Lizard",
            Choice::Spock => "Spock",
        }
    }

    /// True if `self` defeats `other`
    pub fn beats(self, other: Choice) -> bool {
        crate::resolve(self, other) == RoundOutcome::PlayerWin
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no choice
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown choice `{0}`")]
pub struct ParseChoiceError(pub String);

impl FromStr for Choice {
    type Err = ParseChoiceError;

    /// Accepts names (any case) or the 1-based button numbers of the menu
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return number
                .checked_sub(1)
                .and_then(Choice::from_index)
                .ok_or_else(|| ParseChoiceError(s.to_string()));
        }
        Choice::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseChoiceError(s.to_string()))
    }
}

/// Result of one round, seen from the player's side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerWin,
    OpponentWin,
    Draw,
}

impl RoundOutcome {
    /// Same result seen from the other side of the table
    pub fn flipped(self) -> Self {
        match self {
            RoundOutcome::PlayerWin => RoundOutcome::OpponentWin,
            RoundOutcome::OpponentWin => RoundOutcome::PlayerWin,
            RoundOutcome::Draw => RoundOutcome::Draw,
        }
    }

    /// Outcome of comparing two cumulative totals
    pub fn from_totals(player: u32, opponent: u32) -> Self {
        match player.cmp(&opponent) {
            core::cmp::Ordering::Greater => RoundOutcome::PlayerWin,
            core::cmp::Ordering::Less => RoundOutcome::OpponentWin,
            core::cmp::Ordering::Equal => RoundOutcome::Draw,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RoundOutcome::PlayerWin => "Player 1",
            RoundOutcome::OpponentWin => "Player 2",
            RoundOutcome::Draw => "Draw",
        };
        f.write_str(text)
    }
}
