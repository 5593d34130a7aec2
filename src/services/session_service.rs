//! Designer session operations: edits, mode switches, and the image and prompt producers
//! that replace the color list.

use axum::body::Bytes;
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::session::SessionResponse,
    error::ServiceError,
    extract::{ExtractMethod, extract_colors},
    render::RenderMode,
    services::color_service,
    state::{RequestToken, SessionHandle, SharedState, color::HexColor},
};

/// Color appended when the client does not pick one.
pub const DEFAULT_NEW_COLOR: &str = "#FFFFFF";

/// Open a session seeded with the configured defaults.
pub async fn create_session(state: &SharedState) -> SessionResponse {
    let handle = state.create_session();
    let session = handle.lock().await;
    info!(session = %session.id(), "session created");
    SessionResponse::from(&*session)
}

/// Snapshot of a live session.
pub async fn get_session(state: &SharedState, id: Uuid) -> Result<SessionResponse, ServiceError> {
    let handle = require_session(state, id)?;
    let session = handle.lock().await;
    Ok(SessionResponse::from(&*session))
}

/// Drop a session.
pub async fn delete_session(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    if !state.remove_session(id) {
        return Err(not_found(id));
    }
    info!(session = %id, "session deleted");
    Ok(())
}

/// Overwrite the color at `index`.
pub async fn set_color(
    state: &SharedState,
    id: Uuid,
    index: usize,
    color: &str,
) -> Result<SessionResponse, ServiceError> {
    let color = parse_color(color)?;
    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    session.set_color(index, color)?;
    Ok(SessionResponse::from(&*session))
}

/// Append a color, white when `color` is `None`.
pub async fn add_color(
    state: &SharedState,
    id: Uuid,
    color: Option<&str>,
) -> Result<SessionResponse, ServiceError> {
    let color = parse_color(color.unwrap_or(DEFAULT_NEW_COLOR))?;
    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    session.add_color(color);
    Ok(SessionResponse::from(&*session))
}

/// Remove the color at `index`. At the mode's floor the list is left as is.
pub async fn remove_color(
    state: &SharedState,
    id: Uuid,
    index: usize,
) -> Result<SessionResponse, ServiceError> {
    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    if let Err(err) = session.remove_color(index) {
        warn!(session = %id, index, error = %err, "color removal refused");
        return Err(err.into());
    }
    Ok(SessionResponse::from(&*session))
}

/// Replace the whole color list.
pub async fn replace_colors(
    state: &SharedState,
    id: Uuid,
    colors: &[String],
) -> Result<SessionResponse, ServiceError> {
    let colors = colors
        .iter()
        .map(|color| parse_color(color))
        .collect::<Result<Vec<_>, _>>()?;
    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    session.replace_colors(colors)?;
    Ok(SessionResponse::from(&*session))
}

/// Rotate the linear gradient.
pub async fn set_angle(
    state: &SharedState,
    id: Uuid,
    angle: u16,
) -> Result<SessionResponse, ServiceError> {
    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    session.set_angle(angle)?;
    Ok(SessionResponse::from(&*session))
}

/// Switch between linear and mesh rendering.
pub async fn set_mode(
    state: &SharedState,
    id: Uuid,
    mode: RenderMode,
) -> Result<SessionResponse, ServiceError> {
    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    session.set_mode(mode)?;
    info!(session = %id, ?mode, "render mode changed");
    Ok(SessionResponse::from(&*session))
}

/// Draw a new random mesh layout seed.
pub async fn regenerate_mesh(
    state: &SharedState,
    id: Uuid,
) -> Result<SessionResponse, ServiceError> {
    let handle = require_session(state, id)?;
    let seed = state.random_mesh_seed();
    let mut session = handle.lock().await;
    session.set_mesh_seed(seed);
    Ok(SessionResponse::from(&*session))
}

/// Extract colors from an uploaded image and install them, unless another operation on
/// the session happened meanwhile.
pub async fn extract_from_image(
    state: &SharedState,
    id: Uuid,
    bytes: Bytes,
    method: ExtractMethod,
) -> Result<SessionResponse, ServiceError> {
    if bytes.is_empty() {
        return Err(ServiceError::InvalidInput("no image uploaded".into()));
    }

    let handle = require_session(state, id)?;
    let token = begin_request(&handle).await;
    let settings = state.config().extract_settings();

    let colors = task::spawn_blocking(move || extract_colors(&bytes, method, &settings))
        .await
        .map_err(|err| ServiceError::Internal(format!("extraction task failed: {err}")))?
        .inspect_err(|err| warn!(session = %id, ?method, error = %err, "color extraction failed"))?;

    info!(session = %id, ?method, count = colors.len(), "colors extracted from image");
    apply_colors(state, id, token, colors).await
}

/// Ask the language model for colors and install them, unless another operation on the
/// session happened meanwhile.
pub async fn apply_prompt(
    state: &SharedState,
    id: Uuid,
    prompt: Option<String>,
) -> Result<SessionResponse, ServiceError> {
    let prompt = color_service::require_prompt(prompt)?;
    let handle = require_session(state, id)?;
    let token = begin_request(&handle).await;

    let colors = color_service::request_colors(state, prompt).await?;
    apply_colors(state, id, token, colors).await
}

async fn begin_request(handle: &SessionHandle) -> RequestToken {
    handle.lock().await.begin_request()
}

async fn apply_colors(
    state: &SharedState,
    id: Uuid,
    token: RequestToken,
    colors: Vec<HexColor>,
) -> Result<SessionResponse, ServiceError> {
    // The session may have been deleted or evicted while the colors were produced.
    let handle = require_session(state, id).inspect_err(|_| {
        warn!(session = %id, token = token.value(), "session gone; discarding color result");
    })?;
    let mut session = handle.lock().await;
    if let Err(err) = session.apply_colors(token, colors) {
        warn!(session = %id, token = token.value(), error = %err, "discarding color result");
        return Err(err.into());
    }
    Ok(SessionResponse::from(&*session))
}

pub(crate) fn require_session(state: &SharedState, id: Uuid) -> Result<SessionHandle, ServiceError> {
    state.session(id).ok_or_else(|| not_found(id))
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("session `{id}` not found"))
}

fn parse_color(value: &str) -> Result<HexColor, ServiceError> {
    HexColor::parse(value).map_err(|err| ServiceError::InvalidInput(err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use futures::future::BoxFuture;
    use image::{Rgba, RgbaImage};
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{color_model::ColorModel, upstream::UpstreamResult},
        render::export::encode_png,
        services::color_service::tests::CannedModel,
        state::AppState,
    };

    fn hex(response: &SessionResponse) -> Vec<&str> {
        response.colors.iter().map(String::as_str).collect()
    }

    /// Model whose answer is held back until the test releases it.
    struct GatedModel {
        gate: Arc<Notify>,
        calls: AtomicUsize,
    }

    impl ColorModel for GatedModel {
        fn suggest_colors(
            &self,
            _prompt: String,
        ) -> BoxFuture<'static, UpstreamResult<Option<String>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.clone();
            Box::pin(async move {
                gate.notified().await;
                Ok(Some(r##"["#111111", "#222222"]"##.to_string()))
            })
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    #[tokio::test]
    async fn new_sessions_use_the_defaults() {
        let state = AppState::new(AppConfig::default(), None);
        let session = create_session(&state).await;

        assert_eq!(hex(&session), ["#FF0000", "#00FF00", "#0000FF"]);
        assert_eq!(session.angle, 45);
        assert_eq!(session.mode, RenderMode::Linear);
        assert!((1..=1000).contains(&session.mesh_seed));
        assert_eq!(state.session_count(), 1);
    }

    #[tokio::test]
    async fn add_defaults_to_white() {
        let state = AppState::new(AppConfig::default(), None);
        let id = create_session(&state).await.id;

        let session = add_color(&state, id, None).await.unwrap();
        assert_eq!(session.colors.last().map(String::as_str), Some(DEFAULT_NEW_COLOR));
        assert_eq!(session.colors.len(), 4);
    }

    #[tokio::test]
    async fn mesh_floor_keeps_two_colors() {
        let state = AppState::new(AppConfig::default(), None);
        let id = create_session(&state).await.id;
        set_mode(&state, id, RenderMode::Mesh).await.unwrap();
        remove_color(&state, id, 2).await.unwrap();

        let err = remove_color(&state, id, 0).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        let session = get_session(&state, id).await.unwrap();
        assert_eq!(hex(&session), ["#FF0000", "#00FF00"]);
    }

    #[tokio::test]
    async fn unknown_sessions_are_not_found() {
        let state = AppState::new(AppConfig::default(), None);
        let err = get_session(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(delete_session(&state, Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn prompt_result_replaces_the_list() {
        let model = CannedModel::replying(r##"["#FF5733", "#FFC300"]"##);
        let state = AppState::new(AppConfig::default(), Some(model.clone()));
        let id = create_session(&state).await.id;

        let session = apply_prompt(&state, id, Some("sunset".into())).await.unwrap();
        assert_eq!(hex(&session), ["#FF5733", "#FFC300"]);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn blank_prompt_leaves_the_session_alone() {
        let model = CannedModel::replying(r##"["#FF5733"]"##);
        let state = AppState::new(AppConfig::default(), Some(model.clone()));
        let id = create_session(&state).await.id;

        let err = apply_prompt(&state, id, Some("  ".into())).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(model.calls(), 0);
        let session = get_session(&state, id).await.unwrap();
        assert_eq!(session.colors.len(), 3);
    }

    #[tokio::test]
    async fn stale_prompt_result_does_not_overwrite_a_newer_edit() {
        let gate = Arc::new(Notify::new());
        let model = Arc::new(GatedModel {
            gate: gate.clone(),
            calls: AtomicUsize::new(0),
        });
        let state = AppState::new(AppConfig::default(), Some(model.clone()));
        let id = create_session(&state).await.id;

        let pending = tokio::spawn({
            let state = state.clone();
            async move { apply_prompt(&state, id, Some("forest".into())).await }
        });
        while model.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        set_color(&state, id, 0, "#ABCDEF").await.unwrap();
        gate.notify_one();

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        let session = get_session(&state, id).await.unwrap();
        assert_eq!(hex(&session), ["#ABCDEF", "#00FF00", "#0000FF"]);
    }

    #[tokio::test]
    async fn prompt_result_for_a_deleted_session_is_not_found() {
        let gate = Arc::new(Notify::new());
        let model = Arc::new(GatedModel {
            gate: gate.clone(),
            calls: AtomicUsize::new(0),
        });
        let state = AppState::new(AppConfig::default(), Some(model.clone()));
        let id = create_session(&state).await.id;

        let pending = tokio::spawn({
            let state = state.clone();
            async move { apply_prompt(&state, id, Some("ocean".into())).await }
        });
        while model.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        delete_session(&state, id).await.unwrap();
        gate.notify_one();

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(state.session_count(), 0);
    }

    #[tokio::test]
    async fn uploaded_image_colors_are_applied() {
        let state = AppState::new(AppConfig::default(), None);
        let id = create_session(&state).await.id;
        let png = encode_png(&RgbaImage::from_pixel(4, 4, Rgba([18, 52, 86, 255]))).unwrap();

        let session = extract_from_image(&state, id, Bytes::from(png), ExtractMethod::Frequency)
            .await
            .unwrap();
        assert_eq!(hex(&session), ["#123456"]);
    }

    #[tokio::test]
    async fn undecodable_uploads_are_reported() {
        let state = AppState::new(AppConfig::default(), None);
        let id = create_session(&state).await.id;

        let err = extract_from_image(
            &state,
            id,
            Bytes::from_static(b"definitely not an image"),
            ExtractMethod::Palette,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(get_session(&state, id).await.unwrap().colors.len(), 3);
    }
}
