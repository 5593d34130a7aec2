mod client;
mod config;
mod error;
mod models;

pub use client::OpenAiColorModel;
pub use config::OpenAiConfig;
pub use error::{OpenAiError, OpenAiResult};

use crate::dao::upstream::UpstreamError;

impl From<OpenAiError> for UpstreamError {
    fn from(err: OpenAiError) -> Self {
        UpstreamError::unavailable(err.to_string(), err)
    }
}
