use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    render::{
        RenderMode,
        export::{ExportFile, LINEAR_PNG_FILENAME, MESH_PNG_FILENAME},
        linear, mesh,
    },
    services::session_service::require_session,
    state::SharedState,
};

/// Download the linear gradient as SVG. Mesh mode has no vector form.
pub async fn export_svg(state: &SharedState, id: Uuid) -> Result<ExportFile, ServiceError> {
    let handle = require_session(state, id)?;
    let session = handle.lock().await;
    if session.mode() == RenderMode::Mesh {
        return Err(ServiceError::InvalidState(
            "mesh gradients can only be exported as PNG".into(),
        ));
    }

    let markup = linear::svg_markup(session.colors(), session.angle())?;
    info!(session = %id, colors = session.colors().len(), "exported svg");
    Ok(ExportFile::svg(markup))
}

/// Download the current logo as a masked PNG.
pub async fn export_png(state: &SharedState, id: Uuid) -> Result<ExportFile, ServiceError> {
    let handle = require_session(state, id)?;
    let (colors, angle, mode, seed) = {
        let session = handle.lock().await;
        (
            session.colors().to_vec(),
            session.angle(),
            session.mode(),
            session.mesh_seed(),
        )
    };
    let size = state.config().raster_size();
    let generator = state.mesh_generator();

    let file = task::spawn_blocking(move || match mode {
        RenderMode::Linear => linear::rasterize(&colors, angle, size)
            .and_then(|surface| ExportFile::png(LINEAR_PNG_FILENAME, &surface)),
        RenderMode::Mesh => mesh::render_masked(generator.as_ref(), &colors, seed, size)
            .and_then(|surface| ExportFile::png(MESH_PNG_FILENAME, &surface)),
    })
    .await
    .map_err(|err| ServiceError::Internal(format!("render task failed: {err}")))?
    .inspect_err(|err| warn!(session = %id, ?mode, error = %err, "png export failed"))?;

    info!(session = %id, ?mode, size, bytes = file.bytes.len(), "exported png");
    Ok(file)
}
