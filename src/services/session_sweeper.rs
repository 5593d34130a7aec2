use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::state::SharedState;

/// Periodically drop sessions nobody has touched within the configured idle timeout.
pub async fn run(state: SharedState) {
    let idle = state.config().session_idle();
    let mut ticker = interval(state.config().session_sweep());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let evicted = state.evict_idle(idle);
        if evicted > 0 {
            info!(evicted, remaining = state.session_count(), "evicted idle sessions");
        } else {
            debug!(sessions = state.session_count(), "no idle sessions to evict");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test(start_paused = true)]
    async fn abandoned_sessions_are_swept() {
        let config = AppConfig::default()
            .with_session_eviction(Duration::from_secs(60), Duration::from_secs(10));
        let state = AppState::new(config, None);
        for _ in 0..100 {
            state.create_session();
        }
        let sweeper = tokio::spawn(run(state.clone()));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.session_count(), 100);

        tokio::time::sleep(Duration::from_secs(45)).await;
        assert_eq!(state.session_count(), 0);
        sweeper.abort();
    }
}
