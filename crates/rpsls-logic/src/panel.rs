//! Signal panel: everything the player sees and hears
//!
//! The engine only talks in intents ([`SignalPanel`]). [`LedPanel`] turns
//! those intents into lamp and buzzer writes for the board layout, and
//! [`RecordingPanel`] keeps them as a list of events.

use std::time::Duration;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, RoundOutcome};
use crate::clock::Clock;

/// Width of the binary score display
pub const SCORE_BITS: usize = 3;

/// Whose score is being shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Output intents the engine needs from the board
pub trait SignalPanel {
    /// Light the winner's lamp (both lamps on a draw)
    fn indicate_winner(&mut self, outcome: RoundOutcome);
    /// Show one side's score as a binary pattern
    fn display_score(&mut self, side: Side, value: u8);
    /// Flash the score lamps
    fn blink(&mut self, times: u8);
    /// Beep the buzzer
    fn sound(&mut self, times: u8);
    fn display_opponent_choice(&mut self, choice: Choice);
    fn all_off(&mut self);
}

impl<P: SignalPanel + ?Sized> SignalPanel for &mut P {
    fn indicate_winner(&mut self, outcome: RoundOutcome) {
        (**self).indicate_winner(outcome)
    }

    fn display_score(&mut self, side: Side, value: u8) {
        (**self).display_score(side, value)
    }

    fn blink(&mut self, times: u8) {
        (**self).blink(times)
    }

    fn sound(&mut self, times: u8) {
        (**self).sound(times)
    }

    fn display_opponent_choice(&mut self, choice: Choice) {
        (**self).display_opponent_choice(choice)
    }

    fn all_off(&mut self) {
        (**self).all_off()
    }
}

/// Most significant bit first; values above 7 saturate
pub fn score_bits(value: u8) -> [bool; SCORE_BITS] {
    let max = (1u8 << SCORE_BITS) - 1;
    let value = value.min(max);
    let mut bits = [false; SCORE_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (value >> (SCORE_BITS - 1 - i)) & 1 == 1;
    }
    bits
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// One intent sent to the panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelEvent {
    Winner(RoundOutcome),
    Score { side: Side, value: u8 },
    Blink(u8),
    Sound(u8),
    OpponentChoice(Choice),
    AllOff,
}

/// Panel that only remembers what it was asked to show
#[derive(Clone, Debug, Default)]
pub struct RecordingPanel {
    pub events: Vec<PanelEvent>,
}

impl RecordingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total beeps requested, across all `sound` calls
    pub fn beeps(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                PanelEvent::Sound(n) => *n as u32,
                _ => 0,
            })
            .sum()
    }
}

impl SignalPanel for RecordingPanel {
    fn indicate_winner(&mut self, outcome: RoundOutcome) {
        self.events.push(PanelEvent::Winner(outcome));
    }

    fn display_score(&mut self, side: Side, value: u8) {
        self.events.push(PanelEvent::Score { side, value });
    }

    fn blink(&mut self, times: u8) {
        self.events.push(PanelEvent::Blink(times));
    }

    fn sound(&mut self, times: u8) {
        self.events.push(PanelEvent::Sound(times));
    }

    fn display_opponent_choice(&mut self, choice: Choice) {
        self.events.push(PanelEvent::OpponentChoice(choice));
    }

    fn all_off(&mut self) {
        self.events.push(PanelEvent::AllOff);
    }
}

// ---------------------------------------------------------------------------
// Lamp board
// ---------------------------------------------------------------------------

/// Physical outputs of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Shows the opponent's choice
    ChoiceLamp(Choice),
    /// Score display, bit 0 is the most significant
    ScoreBit(u8),
    PlayerLamp,
    OpponentLamp,
    Buzzer,
}

impl Indicator {
    /// Every output, in board order
    pub fn all() -> Vec<Indicator> {
        let mut all: Vec<Indicator> = Choice::ALL.iter().map(|c| Indicator::ChoiceLamp(*c)).collect();
        all.extend((0..SCORE_BITS as u8).map(Indicator::ScoreBit));
        all.extend([Indicator::PlayerLamp, Indicator::OpponentLamp, Indicator::Buzzer]);
        all
    }
}

/// Raw digital outputs
pub trait PinBank {
    fn write(&mut self, indicator: Indicator, on: bool);
}

/// How long each indication stays visible or audible
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelTiming {
    pub winner_hold_ms: u64,
    pub score_hold_ms: u64,
    pub opponent_choice_hold_ms: u64,
    /// On time and off time of one blink
    pub blink_half_period_ms: u64,
    /// On time and off time of one beep
    pub beep_half_period_ms: u64,
}

impl Default for PanelTiming {
    fn default() -> Self {
        Self {
            winner_hold_ms: 1000,
            score_hold_ms: 2000,
            opponent_choice_hold_ms: 3000,
            blink_half_period_ms: 300,
            beep_half_period_ms: 200,
        }
    }
}

/// Drives lamps and the buzzer for each intent, holding every indication
/// for its configured time before clearing it
pub struct LedPanel<P: PinBank, C: Clock> {
    pins: P,
    clock: C,
    timing: PanelTiming,
}

impl<P: PinBank, C: Clock> LedPanel<P, C> {
    pub fn new(pins: P, clock: C) -> Self {
        Self::with_timing(pins, clock, PanelTiming::default())
    }

    pub fn with_timing(pins: P, clock: C, timing: PanelTiming) -> Self {
        Self { pins, clock, timing }
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn into_pins(self) -> P {
        self.pins
    }

    fn hold(&self, ms: u64) {
        self.clock.sleep(Duration::from_millis(ms));
    }

    fn set_score_bits(&mut self, bits: [bool; SCORE_BITS]) {
        for (i, on) in bits.iter().enumerate() {
            self.pins.write(Indicator::ScoreBit(i as u8), *on);
        }
    }

    fn set_side_lamps(&mut self, player: bool, opponent: bool) {
        self.pins.write(Indicator::PlayerLamp, player);
        self.pins.write(Indicator::OpponentLamp, opponent);
    }
}

impl<P: PinBank, C: Clock> SignalPanel for LedPanel<P, C> {
    fn indicate_winner(&mut self, outcome: RoundOutcome) {
        trace!("lamps: winner {:?}", outcome);
        match outcome {
            RoundOutcome::PlayerWin => self.set_side_lamps(true, false),
            RoundOutcome::OpponentWin => self.set_side_lamps(false, true),
            RoundOutcome::Draw => self.set_side_lamps(true, true),
        }
        self.hold(self.timing.winner_hold_ms);
        self.set_side_lamps(false, false);
    }

    fn display_score(&mut self, side: Side, value: u8) {
        trace!("lamps: {:?} score {}", side, value);
        self.set_side_lamps(side == Side::Player, side == Side::Opponent);
        self.set_score_bits(score_bits(value));
        self.hold(self.timing.score_hold_ms);
        self.set_side_lamps(false, false);
        self.set_score_bits([false; SCORE_BITS]);
    }

    fn blink(&mut self, times: u8) {
        for _ in 0..times {
            self.set_score_bits([true; SCORE_BITS]);
            self.hold(self.timing.blink_half_period_ms);
            self.set_score_bits([false; SCORE_BITS]);
            self.hold(self.timing.blink_half_period_ms);
        }
    }

    fn sound(&mut self, times: u8) {
        for _ in 0..times {
            self.pins.write(Indicator::Buzzer, true);
            self.hold(self.timing.beep_half_period_ms);
            self.pins.write(Indicator::Buzzer, false);
            self.hold(self.timing.beep_half_period_ms);
        }
    }

    fn display_opponent_choice(&mut self, choice: Choice) {
        self.pins.write(Indicator::ChoiceLamp(choice), true);
        self.hold(self.timing.opponent_choice_hold_ms);
        self.pins.write(Indicator::ChoiceLamp(choice), false);
    }

    fn all_off(&mut self) {
        for indicator in Indicator::all() {
            self.pins.write(indicator, false);
        }
    }
}
