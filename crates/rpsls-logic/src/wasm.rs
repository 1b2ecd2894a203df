//! WASM bindings for browser match replay

#![cfg(feature = "wasm")]

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    parse_script, resolve, run_match, Choice, MatchConfig, MatchResult, PanelEvent, RecordingPanel,
    ScriptedInput, SeededRng, VirtualClock,
};

#[derive(Serialize)]
struct Replay {
    result: MatchResult,
    panel: Vec<PanelEvent>,
}

/// Replay a scripted match with full round-by-round details
///
/// # Arguments
/// * `script` - Per-round input plan, e.g. `"rock, spock@1.5, -, q"`
/// * `seed` - 32-byte seed for the opponent
/// * `config_json` - Optional MatchConfig JSON; standard rules when absent
///
/// # Returns
/// JSON object `{ result, panel }` with the MatchResult and every panel intent
#[wasm_bindgen]
pub fn replay_match(script: &str, seed: &[u8], config_json: Option<String>) -> Result<JsValue, JsError> {
    let config = match config_json {
        Some(json) => MatchConfig::from_json(&json)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?,
        None => MatchConfig::standard(),
    };
    let steps = parse_script(script).map_err(|e| JsError::new(&format!("Invalid script: {}", e)))?;
    let seed_arr: [u8; 32] = seed
        .try_into()
        .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?;

    let clock = VirtualClock::new();
    let input = ScriptedInput::new(steps, clock.clone());
    let mut panel = RecordingPanel::new();
    let result = run_match(&config, input, &mut panel, SeededRng::new(&seed_arr), clock);

    serde_wasm_bindgen::to_value(&Replay { result, panel: panel.events })
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Outcome of `a` against `b` as `"PlayerWin"`, `"OpponentWin"` or `"Draw"`
#[wasm_bindgen]
pub fn resolve_choices(a: &str, b: &str) -> Result<String, JsError> {
    let a: Choice = a.parse().map_err(|e| JsError::new(&format!("{}", e)))?;
    let b: Choice = b.parse().map_err(|e| JsError::new(&format!("{}", e)))?;
    Ok(format!("{:?}", resolve(a, b)))
}

#[derive(Serialize)]
struct ChoiceInfo {
    index: u8,
    name: &'static str,
    beats: Vec<&'static str>,
}

/// All choices with the two each one beats
#[wasm_bindgen]
pub fn get_choices() -> Result<JsValue, JsError> {
    let infos: Vec<ChoiceInfo> = Choice::ALL
        .iter()
        .map(|c| ChoiceInfo {
            index: c.index(),
            name: c.name(),
            beats: Choice::ALL.iter().filter(|o| c.beats(**o)).map(|o| o.name()).collect(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&infos)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Validate a script without running it
///
/// Returns `{valid: true}` or `{valid: false, error: "..."}`.
#[wasm_bindgen]
pub fn validate_script(script: &str) -> JsValue {
    let result = match parse_script(script) {
        Ok(_) => ValidationResult { valid: true, error: None },
        Err(e) => ValidationResult { valid: false, error: Some(e.to_string()) },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Standard MatchConfig as JSON, as a starting point for edits
#[wasm_bindgen]
pub fn get_default_config() -> Result<String, JsError> {
    serde_json::to_string(&MatchConfig::standard())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
