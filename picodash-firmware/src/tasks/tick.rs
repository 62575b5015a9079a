//! Tick task for the render loop
//!
//! The dashboard does all of its work on these ticks: button polling,
//! the cycle timer, drawing and the LED.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Signal to notify the dashboard of a tick (uptime in ms)
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task(interval_ms: u32) {
    info!("Tick task started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;

        // A missed tick is overwritten; the dashboard only needs the latest time
        TICK_SIGNAL.signal(Instant::now().as_millis());
    }
}
