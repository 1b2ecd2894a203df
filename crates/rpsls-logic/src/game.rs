//! Match execution engine

use log::info;
use serde::{Deserialize, Serialize};

use crate::choice::RoundOutcome;
use crate::clock::Clock;
use crate::config::MatchConfig;
use crate::input::InputSource;
use crate::panel::SignalPanel;
use crate::random::OpponentRng;
use crate::round::{RoundController, RoundReport, RoundResult};

/// Blinks celebrating the end of a match
const FINAL_BLINKS: u8 = 5;
/// Closing beep once the board is cleared
const CLOSING_BEEPS: u8 = 1;

/// Points per side; only ever goes up
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u8,
    pub opponent: u8,
}

impl Score {
    /// Credit the winner of a round; a draw changes nothing
    pub fn award(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::PlayerWin => self.player = self.player.saturating_add(1),
            RoundOutcome::OpponentWin => self.opponent = self.opponent.saturating_add(1),
            RoundOutcome::Draw => {}
        }
    }

    /// True once either side has `threshold` points
    pub fn reached(&self, threshold: u8) -> bool {
        self.player >= threshold || self.opponent >= threshold
    }

    /// Overall leader
    pub fn leader(&self) -> RoundOutcome {
        RoundOutcome::from_totals(self.player as u32, self.opponent as u32)
    }
}

/// Why a match stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    RoundLimitReached,
    ScoreThresholdReached,
    PlayerQuit,
}

/// Live state of the match, owned by [`MatchController`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Current round, 1-based; 0 before the first round
    pub round: u8,
    pub score: Score,
    pub finished: bool,
    pub reason: Option<TerminationReason>,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Every round that started, including a final quit round
    pub rounds: Vec<RoundReport>,
    pub final_score: Score,
    pub winner: RoundOutcome,
    pub reason: TerminationReason,
    /// Rounds that collected input (a quit round does not count)
    pub rounds_played: u8,
}

/// Runs rounds until the cap, the threshold or the quit button ends the match
pub struct MatchController<I, P, R, C> {
    config: MatchConfig,
    input: I,
    panel: P,
    rng: R,
    clock: C,
    state: MatchState,
}

impl<I, P, R, C> MatchController<I, P, R, C>
where
    I: InputSource,
    P: SignalPanel,
    R: OpponentRng,
    C: Clock,
{
    pub fn new(config: MatchConfig, input: I, panel: P, rng: R, clock: C) -> Self {
        Self { config, input, panel, rng, clock, state: MatchState::default() }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Play one round and fold its result into the match state.
    ///
    /// Returns the termination reason when this round ends the match.
    fn step(&mut self, round: u8) -> (RoundReport, Option<TerminationReason>) {
        self.state.round = round;
        let report = RoundController::new(
            &self.config.arbiter,
            &mut self.input,
            &mut self.panel,
            &mut self.rng,
            &self.clock,
        )
        .play(round, &self.state.score);

        if report.result == RoundResult::Quit {
            return (report, Some(TerminationReason::PlayerQuit));
        }

        self.state.score = report.score;
        if self.state.score.reached(self.config.win_threshold) {
            return (report, Some(TerminationReason::ScoreThresholdReached));
        }
        (report, None)
    }

    /// Play a full match from a zero score
    pub fn run(&mut self) -> MatchResult {
        self.state = MatchState::default();
        let mut rounds: Vec<RoundReport> = Vec::with_capacity(self.config.max_rounds as usize);
        let mut reason = TerminationReason::RoundLimitReached;

        for round in 1..=self.config.max_rounds {
            let (report, stop) = self.step(round);
            rounds.push(report);
            if let Some(stop) = stop {
                reason = stop;
                break;
            }
        }

        let rounds_played = rounds.iter().filter(|r| r.result != RoundResult::Quit).count() as u8;
        self.finish(reason, rounds, rounds_played)
    }

    fn finish(
        &mut self,
        reason: TerminationReason,
        rounds: Vec<RoundReport>,
        rounds_played: u8,
    ) -> MatchResult {
        self.state.finished = true;
        self.state.reason = Some(reason);

        let score = self.state.score;
        let winner = score.leader();
        info!(
            "match over after {} rounds ({:?}): {}-{}, winner {}",
            rounds_played, reason, score.player, score.opponent, winner
        );

        self.panel.indicate_winner(winner);
        self.panel.blink(FINAL_BLINKS);
        self.panel.all_off();
        self.panel.sound(CLOSING_BEEPS);

        MatchResult { rounds, final_score: score, winner, reason, rounds_played }
    }
}

/// Run a complete match with the given collaborators
///
/// # Arguments
/// * `config` - Round cap, win threshold and input timing
/// * `input` - Button levels from the board
/// * `panel` - Lamps and buzzer
/// * `rng` - Opponent's choices
/// * `clock` - Time source for polling and hold pauses
pub fn run_match<I, P, R, C>(config: &MatchConfig, input: I, panel: P, rng: R, clock: C) -> MatchResult
where
    I: InputSource,
    P: SignalPanel,
    R: OpponentRng,
    C: Clock,
{
    MatchController::new(config.clone(), input, panel, rng, clock).run()
}
