//! Lamp board drawn as a line of text

use rpsls_logic::{Choice, Indicator, PinBank, SCORE_BITS};

const LIT: char = '●';
const DARK: char = '○';

/// Prints the whole board every time a lamp or the buzzer changes
#[derive(Default)]
pub struct TerminalPins {
    choices: [bool; 5],
    score: [bool; SCORE_BITS],
    player: bool,
    opponent: bool,
    buzzer: bool,
}

impl TerminalPins {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, indicator: Indicator) -> Option<&mut bool> {
        match indicator {
            Indicator::ChoiceLamp(choice) => self.choices.get_mut(choice.index() as usize),
            Indicator::ScoreBit(bit) => self.score.get_mut(bit as usize),
            Indicator::PlayerLamp => Some(&mut self.player),
            Indicator::OpponentLamp => Some(&mut self.opponent),
            Indicator::Buzzer => Some(&mut self.buzzer),
        }
    }

    pub fn render(&self) -> String {
        let lamp = |on: bool| if on { LIT } else { DARK };
        let choices: String = Choice::ALL
            .iter()
            .zip(self.choices.iter())
            .map(|(c, on)| format!("{}{}", &c.name()[..2], lamp(*on)))
            .collect::<Vec<_>>()
            .join(" ");
        let score: String = self.score.iter().map(|on| lamp(*on)).collect();
        format!(
            "  [{}]  score [{}]  P{} O{}  {}",
            choices,
            score,
            lamp(self.player),
            lamp(self.opponent),
            if self.buzzer { "BEEP" } else { "" }
        )
    }
}

impl PinBank for TerminalPins {
    fn write(&mut self, indicator: Indicator, on: bool) {
        let Some(slot) = self.slot(indicator) else {
            log::warn!("no such output: {:?}", indicator);
            return;
        };
        if *slot == on {
            return;
        }
        *slot = on;
        println!("{}", self.render());
    }
}
