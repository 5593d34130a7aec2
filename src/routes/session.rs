use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        color::PromptRequest,
        session::{
            AddColorRequest, ExtractQuery, ReplaceColorsRequest, SessionResponse, SetAngleRequest,
            SetColorRequest, SetModeRequest,
        },
    },
    error::{AppError, ErrorBody},
    routes::extractors::{AppJson, AppPath, AppQuery},
    services::session_service,
    state::SharedState,
};

/// Designer session endpoints. Image uploads are capped at the configured size.
pub fn router(state: &SharedState) -> Router<SharedState> {
    let upload_limit = DefaultBodyLimit::max(state.config().max_upload_bytes());

    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/colors", post(add_color).put(replace_colors))
        .route(
            "/sessions/{id}/colors/{index}",
            put(set_color).delete(remove_color),
        )
        .route("/sessions/{id}/angle", put(set_angle))
        .route("/sessions/{id}/mode", put(set_mode))
        .route("/sessions/{id}/mesh/regenerate", post(regenerate_mesh))
        .route(
            "/sessions/{id}/image",
            post(upload_image).layer(upload_limit),
        )
        .route("/sessions/{id}/prompt", post(apply_prompt))
}

/// Open a new designer session with the default palette.
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "session",
    responses((status = 201, description = "Session created", body = SessionResponse))
)]
pub async fn create_session(
    State(state): State<SharedState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = session_service::create_session(&state).await;
    (StatusCode::CREATED, Json(session))
}

/// Current colors, angle, mode and mesh seed of a session.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn get_session(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(session_service::get_session(&state, id).await?))
}

/// Discard a session.
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn delete_session(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    session_service::delete_session(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the color at `index`.
#[utoipa::path(
    put,
    path = "/sessions/{id}/colors/{index}",
    tag = "session",
    params(
        ("id" = Uuid, Path, description = "Session identifier"),
        ("index" = usize, Path, description = "Zero-based position in the color list")
    ),
    request_body = SetColorRequest,
    responses(
        (status = 200, description = "Color replaced", body = SessionResponse),
        (status = 400, description = "Malformed color", body = ErrorBody),
        (status = 404, description = "Unknown session or index", body = ErrorBody)
    )
)]
pub async fn set_color(
    State(state): State<SharedState>,
    AppPath((id, index)): AppPath<(Uuid, usize)>,
    AppJson(payload): AppJson<SetColorRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;
    let session = session_service::set_color(&state, id, index, &payload.color).await?;
    Ok(Json(session))
}

/// Append a color, white unless one is given.
#[utoipa::path(
    post,
    path = "/sessions/{id}/colors",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = AddColorRequest,
    responses(
        (status = 200, description = "Color appended", body = SessionResponse),
        (status = 400, description = "Malformed color", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn add_color(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    payload: Option<AppJson<AddColorRequest>>,
) -> Result<Json<SessionResponse>, AppError> {
    let payload = payload.map(|AppJson(payload)| payload).unwrap_or_default();
    payload.validate()?;
    let session = session_service::add_color(&state, id, payload.color.as_deref()).await?;
    Ok(Json(session))
}

/// Remove the color at `index`, refused at one color (two in mesh mode).
#[utoipa::path(
    delete,
    path = "/sessions/{id}/colors/{index}",
    tag = "session",
    params(
        ("id" = Uuid, Path, description = "Session identifier"),
        ("index" = usize, Path, description = "Zero-based position in the color list")
    ),
    responses(
        (status = 200, description = "Color removed", body = SessionResponse),
        (status = 404, description = "Unknown session or index", body = ErrorBody),
        (status = 409, description = "List already at its minimum length", body = ErrorBody)
    )
)]
pub async fn remove_color(
    State(state): State<SharedState>,
    AppPath((id, index)): AppPath<(Uuid, usize)>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(session_service::remove_color(&state, id, index).await?))
}

/// Replace the whole color list.
#[utoipa::path(
    put,
    path = "/sessions/{id}/colors",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = ReplaceColorsRequest,
    responses(
        (status = 200, description = "Colors replaced", body = SessionResponse),
        (status = 400, description = "Empty list or malformed color", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "Too few colors for the current mode", body = ErrorBody)
    )
)]
pub async fn replace_colors(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ReplaceColorsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;
    let session = session_service::replace_colors(&state, id, &payload.colors).await?;
    Ok(Json(session))
}

/// Rotate the linear gradient.
#[utoipa::path(
    put,
    path = "/sessions/{id}/angle",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = SetAngleRequest,
    responses(
        (status = 200, description = "Angle updated", body = SessionResponse),
        (status = 400, description = "Angle outside 0..=359", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn set_angle(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<SetAngleRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;
    Ok(Json(session_service::set_angle(&state, id, payload.angle).await?))
}

/// Toggle between the linear and the mesh gradient.
#[utoipa::path(
    put,
    path = "/sessions/{id}/mode",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = SetModeRequest,
    responses(
        (status = 200, description = "Mode updated", body = SessionResponse),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "Mesh mode needs two colors", body = ErrorBody)
    )
)]
pub async fn set_mode(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<SetModeRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(session_service::set_mode(&state, id, payload.mode()).await?))
}

/// Shuffle the mesh gradient layout.
#[utoipa::path(
    post,
    path = "/sessions/{id}/mesh/regenerate",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "New mesh seed drawn", body = SessionResponse),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn regenerate_mesh(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(session_service::regenerate_mesh(&state, id).await?))
}

/// Replace the colors with those extracted from an uploaded image.
#[utoipa::path(
    post,
    path = "/sessions/{id}/image",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier"), ExtractQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Raw image file"),
    responses(
        (status = 200, description = "Colors extracted and applied", body = SessionResponse),
        (status = 400, description = "Empty or undecodable image", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "A newer edit superseded this upload", body = ErrorBody),
        (status = 413, description = "Image larger than the upload limit", body = ErrorBody)
    )
)]
pub async fn upload_image(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<ExtractQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let body = body?;
    let method = query.method.unwrap_or_default();
    let session = session_service::extract_from_image(&state, id, body, method).await?;
    Ok(Json(session))
}

/// Replace the colors with those suggested for a prompt.
#[utoipa::path(
    post,
    path = "/sessions/{id}/prompt",
    tag = "session",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Suggested colors applied", body = SessionResponse),
        (status = 400, description = "Prompt missing or blank", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "A newer edit superseded this prompt", body = ErrorBody),
        (status = 502, description = "Model unreachable or answered with an unusable payload", body = ErrorBody),
        (status = 503, description = "No model configured", body = ErrorBody),
        (status = 504, description = "Model did not answer in time", body = ErrorBody)
    )
)]
pub async fn apply_prompt(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<PromptRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session_service::apply_prompt(&state, id, payload.prompt).await?;
    Ok(Json(session))
}
