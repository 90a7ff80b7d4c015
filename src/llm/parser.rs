//! Turn a free-form utterance into a structured intent
//!
//! The model is asked for JSON only, but replies often carry prose around the
//! object. Extraction runs in two separate steps: locate the brace span, then
//! decode it. A missing span and a malformed span are different failures so
//! they stay distinguishable in the logs, but both degrade to `unknown`.

use crate::core::error::PilotError;
use crate::core::types::{Intent, IntentKind, Params};
use crate::llm::client::Inference;
use serde_json::{Map, Value};
use thiserror::Error;

/// Top-level fields consulted, in order, when repairing a flattened write_code reply
const DESCRIPTION_FIELDS: [&str; 5] = ["description", "request", "prompt", "task", "text"];

/// Why an utterance could not be turned into an intent
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    #[error("inference call failed: {0}")]
    Inference(#[source] PilotError),

    #[error("no JSON object in reply")]
    NoJsonSpan,

    #[error("JSON span did not decode: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Extract an intent, degrading every failure to `unknown`
///
/// Never fails: the failure kind is logged and `{intent: unknown, params: {}}`
/// is returned instead.
pub fn extract_intent(inference: &dyn Inference, utterance: &str) -> Intent {
    match try_extract_intent(inference, utterance) {
        Ok(intent) => intent,
        Err(failure) => {
            match &failure {
                ExtractionFailure::Inference(e) => {
                    tracing::warn!(error = %e, "intent extraction: inference failed")
                }
                ExtractionFailure::NoJsonSpan => {
                    tracing::info!("intent extraction: reply contained no JSON")
                }
                ExtractionFailure::Decode(e) => {
                    tracing::info!(error = %e, "intent extraction: malformed JSON")
                }
            }
            Intent::unknown()
        }
    }
}

/// Extract an intent, keeping the failure kind
pub fn try_extract_intent(
    inference: &dyn Inference,
    utterance: &str,
) -> Result<Intent, ExtractionFailure> {
    let user_prompt = format!("User said: \"{}\"\n\nReturn ONLY valid JSON.", utterance);

    let reply = inference
        .complete(INTENT_SYSTEM_PROMPT, &user_prompt)
        .map_err(ExtractionFailure::Inference)?;
    tracing::debug!(reply = %reply, "intent reply");

    parse_reply(&reply, utterance)
}

/// Parse a raw model reply; `utterance` feeds the write_code shape repair
pub fn parse_reply(reply: &str, utterance: &str) -> Result<Intent, ExtractionFailure> {
    let span = extract_json(reply).ok_or(ExtractionFailure::NoJsonSpan)?;
    decode_intent(span, utterance).map_err(ExtractionFailure::Decode)
}

/// Extract JSON object from LLM response (handles surrounding text)
///
/// Greedy: anchored at the first `{` and the last `}`.
pub fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

/// Decode a JSON span into an intent, repairing known malformed shapes
pub fn decode_intent(span: &str, utterance: &str) -> Result<Intent, serde_json::Error> {
    let object: Map<String, Value> = serde_json::from_str(span)?;

    let kind = object
        .get("intent")
        .and_then(Value::as_str)
        .map(IntentKind::from_tag)
        .unwrap_or(IntentKind::Unknown);

    let params = match object.get("params") {
        Some(Value::Object(map)) => params_from_map(map),
        _ if kind == IntentKind::WriteCode => {
            // Model flattened the shape: {"intent":"write_code","description":"..."}
            let description = DESCRIPTION_FIELDS
                .iter()
                .find_map(|field| object.get(*field).and_then(value_to_param))
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| utterance.to_string());
            tracing::debug!(description = %description, "repaired flattened write_code reply");
            [("description".to_string(), description)].into_iter().collect()
        }
        _ => Params::new(),
    };

    Ok(Intent::new(kind, params))
}

fn params_from_map(map: &Map<String, Value>) -> Params {
    map.iter()
        .filter_map(|(k, v)| value_to_param(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Strings pass through, scalars are stringified, null is dropped
fn value_to_param(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// System prompt for intent extraction
pub const INTENT_SYSTEM_PROMPT: &str = r#"You are an intent extraction assistant for a desktop voice assistant.
Analyze the user's command and return ONLY valid JSON, with no explanation.

Supported intents:
- open_app(app)
- close_app(app)
- screenshot()
- volume_up()
- volume_down()
- type_text(text)
- run_command(cmd)
- write_code(description)

OUTPUT FORMAT:
{"intent": "<intent>", "params": {"<name>": "<value>"}}

If the user is asking to create, write, design, or build something, use:
{"intent": "write_code", "params": {"description": "<full user request>"}}

If the command matches nothing above, use:
{"intent": "unknown", "params": {}}

Examples:
"open notepad" -> {"intent": "open_app", "params": {"app": "notepad"}}
"close chrome" -> {"intent": "close_app", "params": {"app": "chrome"}}
"take a screenshot" -> {"intent": "screenshot", "params": {}}
"turn it up" -> {"intent": "volume_up", "params": {}}
"type hello world" -> {"intent": "type_text", "params": {"text": "hello world"}}
"run ipconfig" -> {"intent": "run_command", "params": {"cmd": "ipconfig"}}
"build me a snake game in python" -> {"intent": "write_code", "params": {"description": "build me a snake game in python"}}
"#;
