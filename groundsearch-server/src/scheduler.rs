//! Background Schedulers
//!
//! ## Session Sweeper
//! Periodically drops conversations idle longer than `session.ttl_secs`, so
//! abandoned sessions release memory even if nobody looks them up again.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::state::AppState;

pub fn start_session_sweeper(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut sweep_interval = interval(every);
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            sweep_interval.tick().await;
            let removed = state.service().sessions().evict_expired();
            if removed > 0 {
                tracing::debug!(
                    "[Scheduler] Swept {} expired sessions, {} remain",
                    removed,
                    state.session_count()
                );
            }
        }
    })
}
