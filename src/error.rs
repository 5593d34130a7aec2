use axum::{
    Json,
    extract::rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    dao::upstream::UpstreamError, extract::ExtractError, render::RenderError,
    state::SessionError,
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// No language model is configured.
    #[error("color model unavailable")]
    Unavailable,
    /// The language model could not be reached or refused the request.
    #[error("upstream failure")]
    Upstream(#[source] UpstreamError),
    /// The language model answered with something that is not a color list.
    #[error("upstream format: {0}")]
    UpstreamFormat(String),
    /// Operation exceeded its timeout limit.
    #[error("operation timed out")]
    Timeout,
    /// Unexpected failure inside the service.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<UpstreamError> for ServiceError {
    fn from(err: UpstreamError) -> Self {
        ServiceError::Upstream(err)
    }
}

impl From<ExtractError> for ServiceError {
    fn from(err: ExtractError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<RenderError> for ServiceError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::NotEnoughColors { .. } => ServiceError::InvalidState(err.to_string()),
            RenderError::EmptySurface { .. }
            | RenderError::Geometry(_)
            | RenderError::Encode { .. } => {
                ServiceError::Internal(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ServiceError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::IndexOutOfRange { .. } => ServiceError::NotFound(err.to_string()),
            SessionError::InvalidAngle(_) => ServiceError::InvalidInput(err.to_string()),
            SessionError::BelowMinimum { .. } | SessionError::Stale { .. } => {
                ServiceError::InvalidState(err.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The upstream model failed or answered with garbage.
    #[error("bad gateway: {0}")]
    BadGateway(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// The upstream model did not answer in time.
    #[error("gateway timeout: {0}")]
    GatewayTimeout(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
    /// The request could not be read into the handler's arguments.
    #[error("rejected request ({status}): {message}")]
    Rejected {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// Extractor explanation.
        message: String,
    },
}

impl AppError {
    /// Human readable message sent to clients, without the status prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::BadGateway(message)
            | AppError::ServiceUnavailable(message)
            | AppError::GatewayTimeout(message)
            | AppError::Internal(message)
            | AppError::Rejected { message, .. } => message,
        }
    }

    /// HTTP status code of this error. Every variant is a non-success status.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Unavailable => {
                AppError::ServiceUnavailable("color model is not configured".into())
            }
            ServiceError::Upstream(source) => AppError::BadGateway(format!(
                "Internal server error. Please try again. ({source})"
            )),
            ServiceError::UpstreamFormat(detail) => AppError::BadGateway(format!(
                "Internal server error. Please try again. ({detail})"
            )),
            ServiceError::Timeout => {
                AppError::GatewayTimeout("color model did not answer in time".into())
            }
            ServiceError::Internal(message) => AppError::Internal(message),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human readable failure description.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let payload = Json(ErrorBody {
            error: self.message().to_string(),
        });

        (self.status(), payload).into_response()
    }
}
