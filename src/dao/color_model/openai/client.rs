use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use tracing::debug;

use crate::dao::{
    color_model::{ColorModel, SYSTEM_PROMPT, user_message},
    upstream::UpstreamResult,
};

use super::{
    config::OpenAiConfig,
    error::{OpenAiError, OpenAiResult},
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
};

const COMPLETIONS_PATH: &str = "chat/completions";

/// [`ColorModel`] backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiColorModel {
    client: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
    model: Arc<str>,
    seed: u64,
}

impl OpenAiColorModel {
    /// Build the HTTP client for the configured endpoint.
    pub fn new(config: OpenAiConfig) -> OpenAiResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| OpenAiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            api_key: Arc::from(config.api_key),
            model: Arc::from(config.model),
            seed: config.seed,
        })
    }

    async fn complete(&self, prompt: &str) -> OpenAiResult<Option<String>> {
        let url = format!("{}/{}", self.base_url, COMPLETIONS_PATH);
        let user = user_message(prompt);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            seed: self.seed,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.as_ref())
            .json(&request)
            .send()
            .await
            .map_err(|source| OpenAiError::RequestSend {
                path: COMPLETIONS_PATH.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(OpenAiError::RequestStatus {
                path: COMPLETIONS_PATH.to_string(),
                status: response.status(),
            });
        }

        let payload = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|source| OpenAiError::DecodeResponse {
                path: COMPLETIONS_PATH.to_string(),
                source,
            })?;

        let content = payload.into_content();
        debug!(model = %self.model, content = ?content, "color model answered");
        Ok(content)
    }
}

impl ColorModel for OpenAiColorModel {
    fn suggest_colors(&self, prompt: String) -> BoxFuture<'static, UpstreamResult<Option<String>>> {
        let model = self.clone();
        Box::pin(async move { model.complete(&prompt).await.map_err(Into::into) })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
