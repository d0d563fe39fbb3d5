//! Backend health polling.

use std::sync::Arc;
use std::time::Duration;

use cardy_client::BankApi;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::state::BankAction;
use crate::store::BankStore;

/// Check backend health once and record the result.
///
/// A failed check is logged and leaves the last known status in place.
/// Returns whether the store was updated.
pub async fn refresh_health(store: &BankStore, api: &dyn BankApi) -> bool {
    match api.check_health().await {
        Ok(report) => {
            debug!(
                status = %report.status,
                llm_available = ?report.llm_available,
                "Health check"
            );
            store.dispatch(BankAction::SetHealthStatus(report));
            true
        }
        Err(e) => {
            warn!(status = e.status(), error = %e.message(), "Health check failed");
            false
        }
    }
}

/// Check immediately, then every `period` until the handle is aborted.
pub fn spawn_health_monitor(
    store: Arc<BankStore>,
    api: Arc<dyn BankApi>,
    period: Duration,
) -> JoinHandle<()> {
    info!(period_secs = period.as_secs(), "Health monitor starting");
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            refresh_health(&store, api.as_ref()).await;
        }
    })
}
