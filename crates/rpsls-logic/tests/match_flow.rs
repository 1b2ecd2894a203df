use proptest::prelude::*;
use rpsls_logic::{
    collect_choice, parse_script, run_match, ArbiterConfig, Channel, Choice, Clock, FixedChoices,
    Indicator, InputSource, LedPanel, MatchConfig, MatchController, PanelEvent, PinBank,
    RecordingPanel, RoundOutcome, RoundResult, Score, ScriptedInput, SeededRng, Step,
    TerminationReason, VirtualClock,
};
use std::time::Duration;

fn scripted_match(
    script: &str,
    opponent: Vec<Choice>,
) -> MatchController<ScriptedInput<VirtualClock>, RecordingPanel, FixedChoices, VirtualClock> {
    let clock = VirtualClock::new();
    let input = ScriptedInput::new(parse_script(script).unwrap(), clock.clone());
    MatchController::new(
        MatchConfig::standard(),
        input,
        RecordingPanel::new(),
        FixedChoices::new(opponent),
        clock,
    )
}

#[test]
fn two_forfeits_in_a_row() {
    let mut game = scripted_match("-, -, q", vec![Choice::Rock]);
    let result = game.run();

    assert_eq!(result.rounds[0].result, RoundResult::Forfeited);
    assert_eq!(result.rounds[1].result, RoundResult::Forfeited);
    assert_eq!(result.rounds[1].score, Score { player: 0, opponent: 2 });
    assert_eq!(MatchConfig::standard().max_rounds - result.rounds_played, 5);

    // Two timeout acknowledgements of two beeps each
    let double_beeps = game
        .panel()
        .events
        .iter()
        .filter(|e| **e == PanelEvent::Sound(2))
        .count();
    assert_eq!(double_beeps, 2);
}

#[test]
fn player_reaches_threshold_in_round_five() {
    let opponent = vec![
        Choice::Scissors,
        Choice::Scissors,
        Choice::Rock,
        Choice::Scissors,
        Choice::Scissors,
        Choice::Scissors,
        Choice::Scissors,
    ];
    let mut game = scripted_match("rock, rock, rock, rock, rock, rock, rock", opponent);
    let result = game.run();

    assert_eq!(result.reason, TerminationReason::ScoreThresholdReached);
    assert_eq!(result.rounds_played, 5);
    assert_eq!(result.final_score, Score { player: 4, opponent: 0 });
    assert_eq!(result.winner, RoundOutcome::PlayerWin);
    // Rounds 6 and 7 never read the board
    assert_eq!(game.input().remaining(), 2);
    assert_eq!(game.state().round, 5);
}

#[test]
fn quit_before_round_three() {
    let mut game = scripted_match("rock, paper, q, rock", vec![Choice::Scissors, Choice::Paper]);
    let result = game.run();

    assert_eq!(result.reason, TerminationReason::PlayerQuit);
    assert_eq!(result.rounds_played, 2);
    assert_eq!(result.rounds.len(), 3);
    assert_eq!(result.rounds[2].result, RoundResult::Quit);
    assert_eq!(result.final_score, result.rounds[1].score);
    assert_eq!(result.final_score, Score { player: 1, opponent: 0 });
    assert_eq!(game.input().remaining(), 1);

    let events = &game.panel().events;
    assert!(events.contains(&PanelEvent::Sound(3)));
}

#[test]
fn dead_transport_round_is_a_forfeit_not_a_failure() {
    let mut game = scripted_match("?, rock", vec![Choice::Scissors]);
    let result = game.run();

    assert_eq!(result.rounds[0].result, RoundResult::Forfeited);
    assert!(matches!(result.rounds[1].result, RoundResult::Played { .. }));
}

/// Lamp board with nothing wired up
struct Unwired;

impl PinBank for Unwired {
    fn write(&mut self, _indicator: Indicator, _on: bool) {}
}

fn single_round(script: &str, lamps: bool) -> RoundResult {
    let config = MatchConfig { max_rounds: 1, win_threshold: 1, ..MatchConfig::standard() };
    let clock = VirtualClock::new();
    let input = ScriptedInput::new(parse_script(script).unwrap(), clock.clone());
    let rng = SeededRng::from_u64(1);
    let result = if lamps {
        let panel = LedPanel::new(Unwired, clock.clone());
        run_match(&config, input, panel, rng, clock)
    } else {
        run_match(&config, input, RecordingPanel::new(), rng, clock)
    };
    result.rounds[0].result
}

#[test]
fn press_delay_ignores_panel_hold_times() {
    // The lamp panel holds the round-start beep; the recording panel takes no time
    for script in ["paper@2.9", "paper@3.3", "spock@3", "lizard@0.1"] {
        assert_eq!(single_round(script, true), single_round(script, false), "script {}", script);
    }
    assert!(matches!(single_round("paper@2.9", true), RoundResult::Played { player: Choice::Paper, .. }));
    assert_eq!(single_round("paper@3.3", true), RoundResult::Forfeited);
}

struct NeverPressed;

impl InputSource for NeverPressed {
    fn read(&mut self, _channel: Channel) -> Option<f32> {
        Some(0.0)
    }
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0u8..5, 0u64..4000).prop_map(|(i, delay_ms)| Step::Press {
            choice: Choice::from_index(i).unwrap(),
            delay_ms,
        }),
        2 => Just(Step::Idle),
        1 => Just(Step::Dead),
        1 => Just(Step::Quit),
    ]
}

proptest! {
    /// Round cap, threshold and point accounting hold for any input
    #[test]
    fn prop_match_invariants(steps in prop::collection::vec(any_step(), 0..12), seed in any::<u64>()) {
        let config = MatchConfig::standard();
        let clock = VirtualClock::new();
        let input = ScriptedInput::new(steps, clock.clone());
        let result = run_match(&config, input, RecordingPanel::new(), SeededRng::from_u64(seed), clock);

        let score = result.final_score;
        prop_assert!(result.rounds_played <= config.max_rounds);
        prop_assert!(result.rounds.len() <= config.max_rounds as usize);
        prop_assert!(score.player <= config.win_threshold);
        prop_assert!(score.opponent <= config.win_threshold);
        prop_assert!((score.player + score.opponent) <= result.rounds_played);
        prop_assert_eq!(result.winner, score.leader());

        match result.reason {
            TerminationReason::RoundLimitReached => {
                prop_assert_eq!(result.rounds_played, config.max_rounds);
                prop_assert!(!score.reached(config.win_threshold));
            }
            TerminationReason::ScoreThresholdReached => {
                prop_assert!(score.reached(config.win_threshold));
            }
            TerminationReason::PlayerQuit => {
                let last = result.rounds.last().unwrap();
                prop_assert_eq!(last.result, RoundResult::Quit);
                let before = result.rounds.iter().rev().nth(1).map(|r| r.score).unwrap_or_default();
                prop_assert_eq!(score, before);
            }
        }

        // Scores never go down from one round to the next
        for pair in result.rounds.windows(2) {
            prop_assert!(pair[1].score.player >= pair[0].score.player);
            prop_assert!(pair[1].score.opponent >= pair[0].score.opponent);
        }
    }

    /// A source that never activates times out within one interval of the deadline
    #[test]
    fn prop_arbiter_timeout_bound(interval in 1u64..1000, extra in 0u64..5000) {
        let config = ArbiterConfig {
            sample_interval_ms: interval,
            deadline_ms: interval + extra,
            ..ArbiterConfig::default()
        };
        let clock = VirtualClock::new();
        let mut input = NeverPressed;

        prop_assert_eq!(collect_choice(&config, &mut input, &clock), None);
        let waited = clock.now();
        prop_assert!(waited >= config.deadline());
        prop_assert!(waited <= config.deadline() + config.sample_interval());
    }
}

#[test]
fn arbiter_times_out_on_wall_clock() {
    let config = ArbiterConfig { sample_interval_ms: 5, deadline_ms: 30, ..ArbiterConfig::default() };
    let clock = rpsls_logic::SystemClock::new();
    let mut input = NeverPressed;

    assert_eq!(collect_choice(&config, &mut input, &clock), None);
    assert!(clock.now() >= Duration::from_millis(30));
}
