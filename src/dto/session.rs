//! DTO definitions used by the designer session routes.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::validation::{validate_hex_color, validate_hex_colors},
    extract::ExtractMethod,
    render::RenderMode,
    state::session::DesignerSession,
};

/// Snapshot of a designer session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Identifier used in every session route.
    pub id: Uuid,
    /// Colors in gradient order.
    #[schema(value_type = Vec<String>, example = json!(["#FF0000", "#00FF00", "#0000FF"]))]
    pub colors: Vec<String>,
    /// Linear gradient rotation in degrees.
    pub angle: u16,
    pub mode: RenderMode,
    /// Seed of the mesh layout, redrawn by `/mesh/regenerate`.
    pub mesh_seed: u32,
}

impl From<&DesignerSession> for SessionResponse {
    fn from(session: &DesignerSession) -> Self {
        Self {
            id: session.id(),
            colors: session
                .colors()
                .iter()
                .map(|color| color.to_string())
                .collect(),
            angle: session.angle(),
            mode: session.mode(),
            mesh_seed: session.mesh_seed(),
        }
    }
}

/// Replace one color of the list.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetColorRequest {
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
}

/// Append a color; white when omitted.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct AddColorRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

/// Replace the whole list.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReplaceColorsRequest {
    #[validate(length(min = 1), custom(function = "validate_hex_colors"))]
    pub colors: Vec<String>,
}

/// Rotate the linear gradient.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetAngleRequest {
    #[validate(range(min = 0, max = 359))]
    pub angle: u16,
}

/// Toggle between the linear and the mesh renderer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetModeRequest {
    /// `true` for the mesh gradient, `false` for the linear one.
    pub mesh: bool,
}

impl SetModeRequest {
    /// Renderer selected by the toggle.
    pub fn mode(&self) -> RenderMode {
        if self.mesh {
            RenderMode::Mesh
        } else {
            RenderMode::Linear
        }
    }
}

/// Query string of the image upload route.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExtractQuery {
    /// `frequency` (default) or `palette`.
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub method: Option<ExtractMethod>,
}
