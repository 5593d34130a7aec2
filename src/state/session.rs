//! In-memory designer session: the color list, gradient settings and request sequencing.

use thiserror::Error;
use uuid::Uuid;

use crate::{render::RenderMode, state::color::HexColor};

/// Largest accepted gradient angle (degrees, exclusive upper bound is 360).
pub const MAX_ANGLE: u16 = 359;

/// Monotonically increasing tag handed to every operation that mutates a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Session mutations that were refused; the session is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No color at `index`.
    #[error("color index {index} is out of range (list has {len} colors)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Current list length.
        len: usize,
    },
    /// Removing or replacing would leave fewer colors than the mode draws.
    #[error("{mode:?} mode needs at least {min} colors")]
    BelowMinimum {
        /// Active render mode.
        mode: RenderMode,
        /// Floor of that mode.
        min: usize,
    },
    /// Angle above 359 degrees.
    #[error("angle {0} is outside 0..=359")]
    InvalidAngle(u16),
    /// A newer request was started after this one.
    #[error("result of request {token} was superseded by request {latest}")]
    Stale {
        /// Token carried by the result.
        token: u64,
        /// Latest token handed out.
        latest: u64,
    },
}

/// State behind one logo being designed.
#[derive(Debug, Clone)]
pub struct DesignerSession {
    id: Uuid,
    colors: Vec<HexColor>,
    angle: u16,
    mode: RenderMode,
    mesh_seed: u32,
    latest: RequestToken,
}

impl DesignerSession {
    /// Start a session in linear mode. An empty `colors` list falls back to black.
    pub fn new(id: Uuid, colors: Vec<HexColor>, angle: u16, mesh_seed: u32) -> Self {
        let colors = if colors.is_empty() {
            vec![HexColor::from_rgb(0, 0, 0)]
        } else {
            colors
        };
        Self {
            id,
            colors,
            angle: angle.min(MAX_ANGLE),
            mode: RenderMode::Linear,
            mesh_seed,
            latest: RequestToken(0),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Ordered color list, never empty.
    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    /// Linear gradient rotation in degrees.
    pub fn angle(&self) -> u16 {
        self.angle
    }

    /// Active renderer.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Seed of the current mesh layout.
    pub fn mesh_seed(&self) -> u32 {
        self.mesh_seed
    }

    /// Claim a new token. Results carrying an older token are rejected by
    /// [`apply_colors`](Self::apply_colors).
    pub fn begin_request(&mut self) -> RequestToken {
        self.latest = RequestToken(self.latest.0 + 1);
        self.latest
    }

    /// Install colors produced asynchronously, unless a newer operation happened since
    /// `token` was issued.
    pub fn apply_colors(
        &mut self,
        token: RequestToken,
        colors: Vec<HexColor>,
    ) -> Result<(), SessionError> {
        if token != self.latest {
            return Err(SessionError::Stale {
                token: token.0,
                latest: self.latest.0,
            });
        }
        self.ensure_floor(colors.len())?;
        self.colors = colors;
        Ok(())
    }

    /// Replace the whole list right away.
    pub fn replace_colors(&mut self, colors: Vec<HexColor>) -> Result<(), SessionError> {
        self.ensure_floor(colors.len())?;
        self.begin_request();
        self.colors = colors;
        Ok(())
    }

    /// Overwrite the color at `index`.
    pub fn set_color(&mut self, index: usize, color: HexColor) -> Result<(), SessionError> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;
        *slot = color;
        self.begin_request();
        Ok(())
    }

    /// Append a color at the end of the list.
    pub fn add_color(&mut self, color: HexColor) {
        self.colors.push(color);
        self.begin_request();
    }

    /// Remove the color at `index`, refusing to go below the current mode's floor.
    pub fn remove_color(&mut self, index: usize) -> Result<HexColor, SessionError> {
        let len = self.colors.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        self.ensure_floor(len - 1)?;
        self.begin_request();
        Ok(self.colors.remove(index))
    }

    /// Change the linear gradient rotation.
    pub fn set_angle(&mut self, angle: u16) -> Result<(), SessionError> {
        if angle > MAX_ANGLE {
            return Err(SessionError::InvalidAngle(angle));
        }
        self.angle = angle;
        self.begin_request();
        Ok(())
    }

    /// Switch renderer. Entering mesh mode requires two colors already in the list.
    pub fn set_mode(&mut self, mode: RenderMode) -> Result<(), SessionError> {
        let min = mode.min_colors();
        if self.colors.len() < min {
            return Err(SessionError::BelowMinimum { mode, min });
        }
        self.mode = mode;
        self.begin_request();
        Ok(())
    }

    /// Install a new mesh layout seed.
    pub fn set_mesh_seed(&mut self, seed: u32) {
        self.mesh_seed = seed;
        self.begin_request();
    }

    fn ensure_floor(&self, len: usize) -> Result<(), SessionError> {
        let min = self.mode.min_colors();
        if len < min {
            return Err(SessionError::BelowMinimum {
                mode: self.mode,
                min,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(value: &str) -> HexColor {
        HexColor::parse(value).unwrap()
    }

    fn session() -> DesignerSession {
        DesignerSession::new(
            Uuid::new_v4(),
            vec![color("#FF0000"), color("#00FF00"), color("#0000FF")],
            45,
            7,
        )
    }

    #[test]
    fn edits_keep_insertion_order_and_allow_duplicates() {
        let mut session = session();
        session.add_color(color("#FFFFFF"));
        session.add_color(color("#FFFFFF"));
        session.set_color(0, color("#123456")).unwrap();
        let hex: Vec<&str> = session.colors().iter().map(HexColor::as_str).collect();
        assert_eq!(hex, ["#123456", "#00FF00", "#0000FF", "#FFFFFF", "#FFFFFF"]);
    }

    #[test]
    fn set_color_out_of_range_is_rejected() {
        let mut session = session();
        assert_eq!(
            session.set_color(3, color("#000000")),
            Err(SessionError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn linear_mode_keeps_at_least_one_color() {
        let mut session = session();
        session.remove_color(0).unwrap();
        session.remove_color(0).unwrap();
        assert!(matches!(
            session.remove_color(0),
            Err(SessionError::BelowMinimum { min: 1, .. })
        ));
        assert_eq!(session.colors().len(), 1);
    }

    #[test]
    fn mesh_mode_keeps_at_least_two_colors() {
        let mut session = session();
        session.set_mode(RenderMode::Mesh).unwrap();
        session.remove_color(2).unwrap();
        let before = session.colors().to_vec();

        assert_eq!(
            session.remove_color(0),
            Err(SessionError::BelowMinimum {
                mode: RenderMode::Mesh,
                min: 2
            })
        );
        assert_eq!(session.colors(), before.as_slice());
    }

    #[test]
    fn mesh_mode_needs_two_colors_to_enter() {
        let mut session = DesignerSession::new(Uuid::new_v4(), vec![color("#FFFFFF")], 0, 1);
        assert!(session.set_mode(RenderMode::Mesh).is_err());
        assert_eq!(session.mode(), RenderMode::Linear);
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut session = session();
        let slow = session.begin_request();
        session.set_color(1, color("#ABCDEF")).unwrap();

        let result = session.apply_colors(slow, vec![color("#000000")]);
        assert!(matches!(result, Err(SessionError::Stale { .. })));
        assert_eq!(session.colors()[1].as_str(), "#ABCDEF");
        assert_eq!(session.colors().len(), 3);
    }

    #[test]
    fn latest_result_is_applied() {
        let mut session = session();
        let first = session.begin_request();
        let second = session.begin_request();
        assert!(second > first);

        session
            .apply_colors(second, vec![color("#FF5733"), color("#FFC300")])
            .unwrap();
        assert!(session.apply_colors(first, vec![color("#000000")]).is_err());
        assert_eq!(session.colors().len(), 2);
    }

    #[test]
    fn angle_must_stay_below_a_full_turn() {
        let mut session = session();
        session.set_angle(359).unwrap();
        assert_eq!(session.set_angle(360), Err(SessionError::InvalidAngle(360)));
        assert_eq!(session.angle(), 359);
    }
}
