use std::error::Error;
use thiserror::Error;

/// Result alias for upstream model calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Error raised by model backends regardless of the vendor behind them.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The backend could not produce an answer.
    #[error("color model unavailable: {message}")]
    Unavailable {
        /// Short description of the failure.
        message: String,
        /// Vendor-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl UpstreamError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        UpstreamError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
