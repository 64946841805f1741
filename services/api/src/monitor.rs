use crate::infra::DashboardState;
use chrono::Local;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Recompute today's snapshot every `period` until the runtime shuts down.
pub(crate) async fn refresh_dashboard(state: DashboardState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(period_secs = period.as_secs(), "dashboard refresh scheduled");

    loop {
        ticker.tick().await;
        state.refresh(Local::now().date_naive()).await;
    }
}
