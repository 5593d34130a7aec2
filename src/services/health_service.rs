use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the prompt bridge has a model behind it, with the live session count.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let sessions = state.session_count();
    if state.is_degraded() {
        warn!("no color model configured (degraded mode)");
        HealthResponse::degraded(sessions)
    } else {
        HealthResponse::ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dto::health::HealthStatus, state::AppState};

    #[tokio::test]
    async fn missing_model_reports_degraded() {
        let state = AppState::new(AppConfig::default(), None);
        state.create_session();

        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.sessions, 1);
    }
}
