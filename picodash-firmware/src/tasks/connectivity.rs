//! Connectivity task
//!
//! Owns the connectivity monitor and polls it on its own slower cadence
//! so connection attempts never hold up the render tick.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use picodash_core::connectivity::{ConnectivityMonitor, ConnectivityState};

use crate::channels::CONNECTIVITY_STATE;
use crate::net::RadioBackend;

/// Connectivity task - drives the state machine and publishes changes
#[embassy_executor::task]
pub async fn connectivity_task(
    mut monitor: ConnectivityMonitor<RadioBackend>,
    poll_interval_ms: u32,
) {
    info!("Connectivity task started");

    if !monitor.has_credentials() {
        info!("No WiFi credentials configured, staying offline");
    }

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let mut last = monitor.state();
    CONNECTIVITY_STATE.signal(last);

    loop {
        ticker.next().await;

        let state = monitor.poll(Instant::now().as_millis());
        if state.same_phase(&last) {
            continue;
        }

        match state {
            ConnectivityState::Connected => info!("WiFi connected"),
            ConnectivityState::Connecting => debug!("WiFi connecting"),
            ConnectivityState::Retrying {
                attempt,
                backoff_ms,
                ..
            } => {
                if let Some(e) = monitor.last_error() {
                    warn!(
                        "WiFi attempt {} failed: {}, retrying in {} ms",
                        attempt, e, backoff_ms
                    );
                }
            }
            ConnectivityState::Disconnected => info!("WiFi disconnected"),
        }

        last = state;
        CONNECTIVITY_STATE.signal(state);
    }
}
