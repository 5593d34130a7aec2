use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Greeting sent with every successful prompt answer, kept for existing clients.
pub const COLOR_RESPONSE_MESSAGE: &str = "Hello God!";

/// Body of `POST /api/color`. A missing prompt is answered like an empty one.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PromptRequest {
    /// Free text describing the wanted colors.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Colors suggested by the language model for a prompt.
#[derive(Debug, Serialize, ToSchema)]
pub struct ColorResponse {
    /// Fixed greeting.
    pub message: String,
    /// Suggested colors, as returned by the model.
    #[schema(value_type = Vec<String>, example = json!(["#FF5733", "#FFC300"]))]
    pub colors: Vec<String>,
}

impl ColorResponse {
    /// Wrap colors with the fixed greeting.
    pub fn new(colors: Vec<String>) -> Self {
        Self {
            message: COLOR_RESPONSE_MESSAGE.to_string(),
            colors,
        }
    }
}
