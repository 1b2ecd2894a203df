//! Scripted input for replays, tests and the console host
//!
//! A script is a comma separated list with one entry per round:
//!
//! * `rock`, `Spock`, `3` - press that button right away
//! * `paper@1.5` - press it 1.5 seconds after the buttons start being polled
//! * `-` - press nothing, the round times out
//! * `?` - the board returns no data for the whole round
//! * `q` - hold the quit button at the start of the round

use core::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::clock::Clock;
use crate::input::{Channel, InputSource};

/// What the player does in one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Press { choice: Choice, delay_ms: u64 },
    Idle,
    Dead,
    Quit,
}

impl Step {
    pub fn press(choice: Choice) -> Self {
        Step::Press { choice, delay_ms: 0 }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Press { choice, delay_ms: 0 } => write!(f, "{}", choice.name().to_lowercase()),
            Step::Press { choice, delay_ms } => {
                write!(f, "{}@{}", choice.name().to_lowercase(), *delay_ms as f64 / 1000.0)
            }
            Step::Idle => f.write_str("-"),
            Step::Dead => f.write_str("?"),
            Step::Quit => f.write_str("q"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("entry {position} is empty")]
    Empty { position: usize },

    #[error("entry {position}: unknown choice `{token}`")]
    UnknownChoice { position: usize, token: String },

    #[error("entry {position}: bad delay `{token}`")]
    BadDelay { position: usize, token: String },
}

/// Parse a script; positions in errors are 1-based
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(i, token)| parse_step(i + 1, token.trim()))
        .collect()
}

fn parse_step(position: usize, token: &str) -> Result<Step, ScriptError> {
    match token {
        "" => return Err(ScriptError::Empty { position }),
        "-" => return Ok(Step::Idle),
        "?" => return Ok(Step::Dead),
        _ if token.eq_ignore_ascii_case("q") || token.eq_ignore_ascii_case("quit") => {
            return Ok(Step::Quit)
        }
        _ => {}
    }

    let (name, delay) = match token.split_once('@') {
        Some((name, delay)) => (name.trim(), Some(delay.trim())),
        None => (token, None),
    };
    let choice: Choice = name.parse().map_err(|_| ScriptError::UnknownChoice {
        position,
        token: token.to_string(),
    })?;
    let delay_ms = match delay {
        None => 0,
        Some(secs) => {
            let secs: f64 = secs.parse().map_err(|_| ScriptError::BadDelay {
                position,
                token: token.to_string(),
            })?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(ScriptError::BadDelay { position, token: token.to_string() });
            }
            (secs * 1000.0).round() as u64
        }
    };
    Ok(Step::Press { choice, delay_ms })
}

/// Render steps back into script text
pub fn format_script(steps: &[Step]) -> String {
    steps.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
}

/// Input source that plays a script against a clock.
///
/// Every read of the quit channel marks a round boundary and moves to
/// the next step. The press delay counts from the first choice-button
/// read after that boundary, so whatever the panel does in between
/// (beeps, held lamps) does not eat into it. Past the end of the script
/// the buttons stay released.
pub struct ScriptedInput<C: Clock> {
    steps: Vec<Step>,
    cursor: usize,
    current: Option<Step>,
    /// Set on the first choice read of the current step
    polling_since: Option<Duration>,
    clock: C,
}

impl<C: Clock> ScriptedInput<C> {
    pub fn new(steps: Vec<Step>, clock: C) -> Self {
        Self { steps, cursor: 0, current: None, polling_since: None, clock }
    }

    /// Steps not yet reached
    pub fn remaining(&self) -> usize {
        self.steps.len().saturating_sub(self.cursor)
    }

    fn begin_next_step(&mut self) {
        self.current = self.steps.get(self.cursor).copied();
        self.cursor += 1;
        self.polling_since = None;
    }

    /// Time since the arbiter began polling this step
    fn polled_for(&mut self) -> Duration {
        let now = self.clock.now();
        now.saturating_sub(*self.polling_since.get_or_insert(now))
    }
}

impl<C: Clock> InputSource for ScriptedInput<C> {
    fn read(&mut self, channel: Channel) -> Option<f32> {
        if channel == Channel::Quit {
            self.begin_next_step();
        }
        match (self.current, channel) {
            (Some(Step::Dead), _) => None,
            (Some(Step::Quit), Channel::Quit) => Some(1.0),
            (Some(Step::Press { choice, delay_ms }), Channel::Choice(read)) => {
                let polled = self.polled_for();
                let pressed = read == choice && polled >= Duration::from_millis(delay_ms);
                Some(if pressed { 1.0 } else { 0.0 })
            }
            _ => Some(0.0),
        }
    }
}
