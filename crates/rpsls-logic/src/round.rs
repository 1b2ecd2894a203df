//! Round controller: one round from the quit check to the score display

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, RoundOutcome};
use crate::clock::Clock;
use crate::config::ArbiterConfig;
use crate::game::Score;
use crate::input::{collect_choice, quit_requested, InputSource};
use crate::panel::{Side, SignalPanel};
use crate::random::OpponentRng;
use crate::resolve;

/// Beeps that open a round
const ROUND_START_BEEPS: u8 = 1;
/// Beeps acknowledging a missed deadline
const TIMEOUT_BEEPS: u8 = 2;
/// Beeps acknowledging the quit button
const QUIT_BEEPS: u8 = 3;

/// Steps of a round, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    CheckQuit,
    AwaitPlayerInput,
    Forfeited,
    OpponentChooses,
    Resolving,
    Signaling,
    Done,
}

/// How a round ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// Quit button held at the start of the round; nothing else ran
    Quit,
    /// No button before the deadline; the opponent gets the point
    Forfeited,
    Played {
        player: Choice,
        opponent: Choice,
        outcome: RoundOutcome,
    },
}

impl RoundResult {
    /// Side credited with this round's point, if any
    pub fn awarded(&self) -> Option<RoundOutcome> {
        match self {
            RoundResult::Quit => None,
            RoundResult::Forfeited => Some(RoundOutcome::OpponentWin),
            RoundResult::Played { outcome, .. } => Some(*outcome),
        }
    }
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u8,
    pub result: RoundResult,
    /// Cumulative score once this round is counted
    pub score: Score,
}

/// Borrows the match's collaborators for the length of one round
pub struct RoundController<'a, I, P, R, C> {
    pub config: &'a ArbiterConfig,
    pub input: &'a mut I,
    pub panel: &'a mut P,
    pub rng: &'a mut R,
    pub clock: &'a C,
    phase: RoundPhase,
}

impl<'a, I, P, R, C> RoundController<'a, I, P, R, C>
where
    I: InputSource,
    P: SignalPanel,
    R: OpponentRng,
    C: Clock,
{
    pub fn new(
        config: &'a ArbiterConfig,
        input: &'a mut I,
        panel: &'a mut P,
        rng: &'a mut R,
        clock: &'a C,
    ) -> Self {
        Self { config, input, panel, rng, clock, phase: RoundPhase::CheckQuit }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    fn enter(&mut self, round: u8, phase: RoundPhase) {
        debug!("round {}: {:?} -> {:?}", round, self.phase, phase);
        self.phase = phase;
    }

    /// Play round `round` starting from `score`.
    ///
    /// The returned report carries the updated score; the caller decides
    /// whether it stands and whether another round follows.
    pub fn play(&mut self, round: u8, score: &Score) -> RoundReport {
        self.phase = RoundPhase::CheckQuit;
        if quit_requested(&mut *self.input, self.config) {
            info!("round {}: quit requested", round);
            self.panel.sound(QUIT_BEEPS);
            self.enter(round, RoundPhase::Done);
            return RoundReport { round, result: RoundResult::Quit, score: *score };
        }

        info!("round {}", round);
        self.panel.sound(ROUND_START_BEEPS);
        self.enter(round, RoundPhase::AwaitPlayerInput);

        let mut next = *score;
        let result = match collect_choice(self.config, &mut *self.input, self.clock) {
            None => {
                self.enter(round, RoundPhase::Forfeited);
                info!("round {}: no choice in time, point to opponent", round);
                self.panel.sound(TIMEOUT_BEEPS);
                next.award(RoundOutcome::OpponentWin);
                RoundResult::Forfeited
            }
            Some(player) => {
                self.enter(round, RoundPhase::OpponentChooses);
                let opponent = self.rng.next_choice();
                info!("round {}: player {} vs opponent {}", round, player, opponent);
                self.panel.display_opponent_choice(opponent);

                self.enter(round, RoundPhase::Resolving);
                let outcome = resolve(player, opponent);
                self.panel.indicate_winner(outcome);
                next.award(outcome);
                RoundResult::Played { player, opponent, outcome }
            }
        };

        self.enter(round, RoundPhase::Signaling);
        info!("round {}: score {}-{}", round, next.player, next.opponent);
        self.panel.display_score(Side::Player, next.player);
        self.panel.display_score(Side::Opponent, next.opponent);

        self.enter(round, RoundPhase::Done);
        RoundReport { round, result, score: next }
    }
}
