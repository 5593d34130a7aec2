//! Request extractors whose rejections answer with the shared `{ "error": ... }` body.

use axum::extract::{
    FromRequest, FromRequestParts, OptionalFromRequest, Request, rejection::JsonRejection,
};

use crate::error::AppError;

/// JSON body. Malformed or mistyped payloads become an [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// An absent body (no `Content-Type`) yields `None`; a present but invalid one is rejected.
impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    axum::Json<T>: OptionalFromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let payload =
            <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(payload.map(|axum::Json(value)| AppJson(value)))
    }
}

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
