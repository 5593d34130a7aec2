use serde::Serialize;
use utoipa::ToSchema;

/// Overall service condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every route is served.
    Ok,
    /// No color model configured; the prompt routes answer 503.
    Degraded,
}

/// Payload of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: HealthStatus,
    /// Number of designer sessions held in memory.
    pub sessions: usize,
}

impl HealthResponse {
    /// The prompt bridge has a model behind it.
    pub fn ok(sessions: usize) -> Self {
        Self {
            status: HealthStatus::Ok,
            sessions,
        }
    }

    /// The prompt bridge has no model behind it.
    pub fn degraded(sessions: usize) -> Self {
        Self {
            status: HealthStatus::Degraded,
            sessions,
        }
    }
}
