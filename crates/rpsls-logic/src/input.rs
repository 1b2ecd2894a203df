//! Input arbiter: timed collection of the player's button press

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::clock::Clock;
use crate::config::ArbiterConfig;

/// Logical input line read from the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// One of the five choice buttons
    Choice(Choice),
    /// The button that ends the match early
    Quit,
}

/// Source of analog button levels.
///
/// `None` means the transport had no reading for that channel yet, which
/// is treated like a released button and retried on the next scan.
pub trait InputSource {
    fn read(&mut self, channel: Channel) -> Option<f32>;
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn read(&mut self, channel: Channel) -> Option<f32> {
        (**self).read(channel)
    }
}

fn is_active(level: Option<f32>, threshold: f32) -> bool {
    matches!(level, Some(value) if value > threshold)
}

/// Read the quit button once
pub fn quit_requested<I: InputSource + ?Sized>(input: &mut I, config: &ArbiterConfig) -> bool {
    let level = input.read(Channel::Quit);
    if level.is_none() {
        trace!("quit channel: no data");
    }
    is_active(level, config.activation_threshold)
}

/// Scan the choice buttons in order and stop at the first pressed one
fn scan_choices<I: InputSource + ?Sized>(input: &mut I, threshold: f32) -> Option<Choice> {
    Choice::ALL.into_iter().find(|&choice| {
        let level = input.read(Channel::Choice(choice));
        trace!("sample {}: {:?}", choice, level);
        is_active(level, threshold)
    })
}

/// Wait for the player's choice.
///
/// Polls every `sample_interval` until a choice button is active or the
/// deadline passes. The last sleep is clamped to the time left, so a
/// timeout returns `None` at the deadline and never more than one
/// interval after it.
pub fn collect_choice<I, C>(config: &ArbiterConfig, input: &mut I, clock: &C) -> Option<Choice>
where
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    let started = clock.now();
    let deadline = config.deadline();
    let interval = config.sample_interval();

    loop {
        if let Some(choice) = scan_choices(input, config.activation_threshold) {
            debug!("choice {} after {:?}", choice, clock.now().saturating_sub(started));
            return Some(choice);
        }

        let elapsed = clock.now().saturating_sub(started);
        if elapsed >= deadline {
            debug!("no choice within {:?}", deadline);
            return None;
        }
        clock.sleep(interval.min(deadline - elapsed));
    }
}
