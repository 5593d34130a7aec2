use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::color::{ColorResponse, PromptRequest},
    error::{AppError, ErrorBody},
    routes::extractors::AppJson,
    services::color_service,
    state::SharedState,
};

/// Prompt-to-colors bridge.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/color", post(suggest_colors))
}

/// Ask the language model for the colors described by a prompt.
#[utoipa::path(
    post,
    path = "/api/color",
    tag = "color",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Colors matching the prompt", body = ColorResponse),
        (status = 400, description = "Prompt missing or blank", body = ErrorBody),
        (status = 502, description = "Model unreachable or answered with an unusable payload", body = ErrorBody),
        (status = 503, description = "No model configured", body = ErrorBody),
        (status = 504, description = "Model did not answer in time", body = ErrorBody)
    )
)]
pub async fn suggest_colors(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<PromptRequest>,
) -> Result<Json<ColorResponse>, AppError> {
    let colors = color_service::colors_for_prompt(&state, payload.prompt).await?;
    Ok(Json(ColorResponse::new(
        colors.into_iter().map(String::from).collect(),
    )))
}
