//! Error types raised by the OpenAI chat-completions client.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`OpenAiError`] failures.
pub type OpenAiResult<T> = Result<T, OpenAiError>;

/// Failures that can occur while talking to the chat-completions API.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// Required environment variable is missing.
    #[error("missing OpenAI environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build OpenAI client")]
    ClientBuilder {
        /// Builder failure.
        #[source]
        source: reqwest::Error,
    },
    /// The completion request could not be sent.
    #[error("failed to send OpenAI request to `{path}`")]
    RequestSend {
        /// Endpoint path.
        path: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status code.
    #[error("unexpected OpenAI response status {status} for `{path}`")]
    RequestStatus {
        /// Endpoint path.
        path: String,
        /// Status returned by the API.
        status: StatusCode,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode OpenAI response for `{path}`")]
    DecodeResponse {
        /// Endpoint path.
        path: String,
        /// Decoding failure.
        #[source]
        source: reqwest::Error,
    },
}
