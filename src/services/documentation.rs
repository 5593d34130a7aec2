use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the diamond logo backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::color::suggest_colors,
        crate::routes::session::create_session,
        crate::routes::session::get_session,
        crate::routes::session::delete_session,
        crate::routes::session::set_color,
        crate::routes::session::add_color,
        crate::routes::session::remove_color,
        crate::routes::session::replace_colors,
        crate::routes::session::set_angle,
        crate::routes::session::set_mode,
        crate::routes::session::regenerate_mesh,
        crate::routes::session::upload_image,
        crate::routes::session::apply_prompt,
        crate::routes::export::export_svg,
        crate::routes::export::export_png,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::color::PromptRequest,
            crate::dto::color::ColorResponse,
            crate::dto::session::SessionResponse,
            crate::dto::session::SetColorRequest,
            crate::dto::session::AddColorRequest,
            crate::dto::session::ReplaceColorsRequest,
            crate::dto::session::SetAngleRequest,
            crate::dto::session::SetModeRequest,
            crate::error::ErrorBody,
            crate::render::RenderMode,
            crate::extract::ExtractMethod,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "color", description = "Prompt-to-colors bridge"),
        (name = "session", description = "Designer session editing"),
        (name = "export", description = "SVG and PNG downloads"),
    )
)]
pub struct ApiDoc;
