//! Keyboard buttons for interactive play
//!
//! Each line typed on stdin is one button press: `1`-`5` or a choice name
//! presses that button, `q` holds the quit button until the next round.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};
use rpsls_logic::{Channel, Choice, InputSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Choice(Choice),
    Quit,
}

pub fn parse_key(line: &str) -> Option<Key> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Some(Key::Quit);
    }
    line.parse().ok().map(Key::Choice)
}

/// Input source fed by lines from a reader thread.
///
/// A choice press is held until the arbiter reads that button. Reading the
/// quit channel starts a round, so presses typed while the previous round
/// was still being signalled are dropped there.
pub struct KeyboardInput {
    lines: Receiver<String>,
    pressed: Option<Choice>,
    quit: bool,
    closed: bool,
}

impl KeyboardInput {
    /// Read lines from stdin on a background thread
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(lines: Receiver<String>) -> Self {
        Self { lines, pressed: None, quit: false, closed: false }
    }

    fn drain(&mut self) {
        loop {
            match self.lines.try_recv() {
                Ok(line) => match parse_key(&line) {
                    Some(Key::Quit) => self.quit = true,
                    Some(Key::Choice(choice)) => self.pressed = Some(choice),
                    None if line.trim().is_empty() => {}
                    None => warn!("not a button: `{}`", line.trim()),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        debug!("keyboard closed");
                        self.closed = true;
                    }
                    break;
                }
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn read(&mut self, channel: Channel) -> Option<f32> {
        self.drain();
        let on = match channel {
            Channel::Quit => {
                self.pressed = None;
                std::mem::take(&mut self.quit)
            }
            Channel::Choice(choice) if self.pressed == Some(choice) => {
                self.pressed = None;
                true
            }
            Channel::Choice(_) => false,
        };
        Some(if on { 1.0 } else { 0.0 })
    }
}
