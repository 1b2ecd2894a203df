//! Match Logic for Rock-Paper-Scissors-Lizard-Spock
//!
//! Core game logic for a best-of-seven match against a random opponent,
//! played on timed button input and reported through lamps and a buzzer.
//! This crate is compiled to:
//! - Native (for the console host and board drivers)
//! - WASM (for browser match replay)

mod choice;
mod clock;
mod config;
mod game;
mod input;
mod panel;
mod random;
mod round;
mod script;

#[cfg(feature = "wasm")]
mod wasm;

pub use choice::{Choice, ParseChoiceError, RoundOutcome, CHOICE_COUNT};
pub use clock::{Clock, SystemClock, VirtualClock};
pub use config::{
    ArbiterConfig, ConfigError, MatchConfig, ACTIVATION_THRESHOLD, INPUT_DEADLINE_MS, MAX_ROUNDS,
    SAMPLE_INTERVAL_MS, WIN_THRESHOLD,
};
pub use game::{run_match, MatchController, MatchResult, MatchState, Score, TerminationReason};
pub use input::{collect_choice, quit_requested, Channel, InputSource};
pub use panel::{
    score_bits, Indicator, LedPanel, PanelEvent, PanelTiming, PinBank, RecordingPanel, Side,
    SignalPanel, SCORE_BITS,
};
pub use random::{FixedChoices, OpponentRng, SeededRng};
pub use round::{RoundController, RoundPhase, RoundReport, RoundResult};
pub use script::{format_script, parse_script, ScriptError, ScriptedInput, Step};

/// Outcome of `a` against `b`, seen from `a`'s side.
///
/// With `d = (a - b) mod 5`, offsets 1 and 3 win for `a`, offsets 2 and 4
/// win for `b`, and 0 is a draw.
pub fn resolve(a: Choice, b: Choice) -> RoundOutcome {
    let d = (a.index() + CHOICE_COUNT - b.index()) % CHOICE_COUNT;
    match d {
        0 => RoundOutcome::Draw,
        1 | 3 => RoundOutcome::PlayerWin,
        _ => RoundOutcome::OpponentWin,
    }
}
