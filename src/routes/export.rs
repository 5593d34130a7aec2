use axum::{
    Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    error::{AppError, ErrorBody},
    render::export::ExportFile,
    routes::extractors::AppPath,
    services::export_service,
    state::SharedState,
};

/// Logo downloads.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sessions/{id}/export/svg", get(export_svg))
        .route("/sessions/{id}/export/png", get(export_png))
}

/// Download the linear gradient logo as `diamond_logo.svg`.
#[utoipa::path(
    get,
    path = "/sessions/{id}/export/svg",
    tag = "export",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "SVG attachment", content_type = "image/svg+xml", body = String),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "Session is in mesh mode", body = ErrorBody)
    )
)]
pub async fn export_svg(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ExportFile, AppError> {
    Ok(export_service::export_svg(&state, id).await?)
}

/// Download the logo as a masked PNG, named after the active mode.
#[utoipa::path(
    get,
    path = "/sessions/{id}/export/png",
    tag = "export",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "PNG attachment", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn export_png(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ExportFile, AppError> {
    Ok(export_service::export_png(&state, id).await?)
}
