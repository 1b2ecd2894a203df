//! Human-readable match transcript

use std::fmt::Write;

use rpsls_logic::{Choice, MatchResult, RoundResult, TerminationReason};

/// Button menu shown before the match
pub fn menu() -> String {
    Choice::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}: {}", i + 1, c))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(result: &MatchResult) -> String {
    let mut out = String::new();
    for round in &result.rounds {
        let _ = writeln!(out, "\nRound {}", round.round);
        match round.result {
            RoundResult::Quit => {
                let _ = writeln!(out, "Game ended by player.");
                continue;
            }
            RoundResult::Forfeited => {
                let _ = writeln!(out, "Player 1 did not make a choice in time.");
            }
            RoundResult::Played { player, opponent, outcome } => {
                let _ = writeln!(out, "Player 1 choice: {}", player);
                let _ = writeln!(out, "Player 2 choice: {}", opponent);
                let _ = writeln!(out, "Round winner: {}", outcome);
            }
        }
        let _ = writeln!(out, "Player 1 Points = {}", round.score.player);
        let _ = writeln!(out, "Player 2 Points = {}", round.score.opponent);
    }

    let reason = match result.reason {
        TerminationReason::RoundLimitReached => "all rounds played",
        TerminationReason::ScoreThresholdReached => "winning score reached",
        TerminationReason::PlayerQuit => "quit by player",
    };
    let _ = writeln!(out, "\nMatch over ({}) after {} rounds", reason, result.rounds_played);
    let _ = write!(out, "Final Winner: {}", result.winner);
    out
}
