//! Prompt-to-colors bridge: forwards a text prompt to the language model and turns its
//! answer into a validated color list.

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::{error::ServiceError, state::SharedState, state::color::HexColor};

/// Message returned when the prompt is missing or blank.
pub const MISSING_PROMPT: &str = "Please provide prompt.";

/// Reject missing, empty and whitespace-only prompts before anything leaves the process.
pub fn require_prompt(prompt: Option<String>) -> Result<String, ServiceError> {
    match prompt {
        Some(prompt) if !prompt.trim().is_empty() => Ok(prompt),
        _ => Err(ServiceError::InvalidInput(MISSING_PROMPT.into())),
    }
}

/// Ask the configured model for colors matching `prompt`.
///
/// The caller is expected to have run [`require_prompt`] first.
pub async fn request_colors(
    state: &SharedState,
    prompt: String,
) -> Result<Vec<HexColor>, ServiceError> {
    let model = state.color_model().ok_or(ServiceError::Unavailable)?;
    let deadline = state.config().model_timeout();

    let content = match timeout(deadline, model.suggest_colors(prompt)).await {
        Ok(result) => result.inspect_err(|err| {
            warn!(model = model.name(), error = %err, "color model call failed");
        })?,
        Err(_) => {
            warn!(model = model.name(), timeout = ?deadline, "color model call timed out");
            return Err(ServiceError::Timeout);
        }
    };
    debug!(content = ?content, "color model content");

    let content = content
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ServiceError::UpstreamFormat("model returned no content".into()))?;

    parse_model_colors(&content).inspect_err(|err| {
        warn!(error = %err, "color model answered with an unusable payload");
    })
}

/// Validate, then answer, a `POST /api/color` request.
pub async fn colors_for_prompt(
    state: &SharedState,
    prompt: Option<String>,
) -> Result<Vec<HexColor>, ServiceError> {
    let prompt = require_prompt(prompt)?;
    request_colors(state, prompt).await
}

/// Parse the model's text strictly as JSON and accept only a non-empty array of hex
/// color strings.
pub fn parse_model_colors(content: &str) -> Result<Vec<HexColor>, ServiceError> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|err| ServiceError::UpstreamFormat(format!("model output is not JSON: {err}")))?;

    let Value::Array(entries) = value else {
        return Err(ServiceError::UpstreamFormat(
            "model output is not a JSON array".into(),
        ));
    };
    if entries.is_empty() {
        return Err(ServiceError::UpstreamFormat(
            "model output is an empty array".into(),
        ));
    }

    entries
        .iter()
        .map(|entry| {
            let text = entry.as_str().ok_or_else(|| {
                ServiceError::UpstreamFormat(format!("model output entry {entry} is not a string"))
            })?;
            HexColor::parse(text).map_err(|err| ServiceError::UpstreamFormat(err.to_string()))
        })
        .collect()
}
