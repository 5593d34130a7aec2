use super::error::{OpenAiError, OpenAiResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";
/// Fixed sampling seed so identical prompts tend to produce identical palettes.
pub const DEFAULT_SEED: u64 = 10_000;

/// Runtime configuration describing how to reach the chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API root, without the trailing `/chat/completions`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name sent with every request.
    pub model: String,
    /// Sampling seed sent with every request.
    pub seed: u64,
}

impl OpenAiConfig {
    /// Construct a configuration for the public API with the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            seed: DEFAULT_SEED,
        }
    }

    /// Point the client at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use another model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> OpenAiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(OpenAiError::MissingEnvVar {
                var: "OPENAI_API_KEY",
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config = config.with_model(model);
        }
        Ok(config)
    }
}
