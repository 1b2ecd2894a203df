//! Console host
//!
//! Plays one match on a terminal lamp board. Button presses come from the
//! keyboard (`--interactive`), a script (`--script`), or are made up at
//! random when neither is given.

mod keyboard;
mod terminal;
mod transcript;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use rpsls_logic::{
    format_script, parse_script, Choice, Clock, InputSource, LedPanel, MatchConfig, MatchController,
    MatchResult, ScriptedInput, SeededRng, Step, SystemClock, VirtualClock,
};

use keyboard::KeyboardInput;
use terminal::TerminalPins;

#[derive(Parser)]
#[command(name = "rpsls")]
#[command(about = "Play Rock-Paper-Scissors-Lizard-Spock against a random opponent", long_about = None)]
struct Cli {
    /// Match config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Three rounds, first to two (ignored with --config)
    #[arg(long, default_value = "false")]
    quick: bool,

    /// Per-round input, e.g. "rock, spock@1.5, -, ?, q"
    #[arg(long)]
    script: Option<String>,

    /// Type 1-5 or a choice name and Enter to press a button, q to quit (real time)
    #[arg(short, long, default_value = "false", conflicts_with = "script")]
    interactive: bool,

    /// Opponent seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Hold lamps and wait for input in real time
    #[arg(long, default_value = "false")]
    realtime: bool,

    /// Print the transcript as JSON instead of text
    #[arg(long, default_value = "false")]
    json: bool,

    /// Debug logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<MatchConfig> {
    match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            MatchConfig::from_json(&text).with_context(|| format!("loading config {}", path.display()))
        }
        None if cli.quick => Ok(MatchConfig::quick()),
        None => Ok(MatchConfig::standard()),
    }
}

/// A press for every round, each within the deadline
fn random_script(rounds: u8, deadline_ms: u64) -> Vec<Step> {
    let mut rng = rand::thread_rng();
    (0..rounds)
        .map(|_| Step::Press {
            choice: Choice::ALL[rng.gen_range(0..Choice::ALL.len())],
            delay_ms: rng.gen_range(0..deadline_ms.max(1)),
        })
        .collect()
}

fn play<I: InputSource, C: Clock + Clone>(config: MatchConfig, input: I, seed: u64, clock: C) -> MatchResult {
    let panel = LedPanel::new(TerminalPins::new(), clock.clone());
    let mut game = MatchController::new(config, input, panel, SeededRng::from_u64(seed), clock);
    game.run()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();

    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    let result = if cli.interactive {
        log::info!("seed {}, keyboard input", seed);
        println!("Game Begins!!!");
        println!("{}", transcript::menu());
        println!("Type a number or name and press Enter within {} ms; q quits.", config.arbiter.deadline_ms);
        play(config, KeyboardInput::stdin(), seed, SystemClock::new())
    } else {
        let steps = match &cli.script {
            Some(text) => parse_script(text).context("parsing --script")?,
            None => random_script(config.max_rounds, config.arbiter.deadline_ms),
        };
        log::info!("seed {}, script: {}", seed, format_script(&steps));
        println!("Game Begins!!!");
        println!("{}", transcript::menu());

        if cli.realtime {
            let clock = SystemClock::new();
            play(config, ScriptedInput::new(steps, clock.clone()), seed, clock)
        } else {
            let clock = VirtualClock::new();
            play(config, ScriptedInput::new(steps, clock.clone()), seed, clock)
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", transcript::render(&result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_script_stays_within_deadline() {
        let steps = random_script(7, 3000);
        assert_eq!(steps.len(), 7);
        for step in steps {
            match step {
                Step::Press { delay_ms, .. } => assert!(delay_ms < 3000),
                other => panic!("unexpected step {:?}", other),
            }
        }
    }

    #[test]
    fn test_play_on_virtual_clock() {
        let steps = parse_script("rock, rock, rock, rock, rock, rock, rock").unwrap();
        let clock = VirtualClock::new();
        let result = play(MatchConfig::standard(), ScriptedInput::new(steps, clock.clone()), 1, clock);
        assert!(result.rounds_played >= 4 && result.rounds_played <= 7);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from(["rpsls", "--quick", "--seed", "7", "--script", "rock, q", "--json"]);
        assert!(cli.quick && cli.json);
        assert_eq!(cli.seed, Some(7));
        let config = load_config(&cli).unwrap();
        assert_eq!(config.max_rounds, 3);
        assert!(!cli.interactive);
    }

    #[test]
    fn test_interactive_excludes_script() {
        let cli = Cli::parse_from(["rpsls", "-i", "--quick"]);
        assert!(cli.interactive);
        assert!(Cli::try_parse_from(["rpsls", "--interactive", "--script", "rock"]).is_err());
    }

    #[test]
    fn test_play_with_closed_keyboard_forfeits() {
        let (tx, rx) = std::sync::mpsc::channel::<String>();
        drop(tx);
        let result = play(MatchConfig::quick(), KeyboardInput::from_receiver(rx), 3, VirtualClock::new());
        assert_eq!(result.final_score.player, 0);
        assert!(result
            .rounds
            .iter()
            .all(|r| r.result == rpsls_logic::RoundResult::Forfeited));
    }
}
