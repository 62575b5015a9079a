//! Dashboard loop
//!
//! Runs in the main task. Owns the scheduler (and through it the panel and
//! LED), the buttons and the memory monitor. Waits on the tick signal or a
//! connectivity update, whichever comes first.

use defmt::*;
use embassy_futures::select::{select, Either};

use picodash_core::clock::WallClock;
use picodash_core::config::BUTTON_COUNT;
use picodash_core::connectivity::ConnectivityState;
use picodash_core::input::{Button, ButtonFault, InputController};
use picodash_core::memory::MemoryMonitor;
use picodash_core::scheduler::{CycleScheduler, TickEnv, TickReport, Transition};
use picodash_core::traits::{DrawSurface, IndicatorLed, MemoryProbe};
use picodash_drivers::input::ButtonBank;
use picodash_hal::InputPin;

use crate::channels::CONNECTIVITY_STATE;
use crate::tasks::tick::TICK_SIGNAL;

/// Everything the render tick touches
pub struct Dashboard<S, L, P, I> {
    scheduler: CycleScheduler<S, L>,
    input: InputController,
    buttons: ButtonBank<I>,
    memory: MemoryMonitor<P>,
    clock: WallClock,
    connectivity: ConnectivityState,
    /// Uptime at the previous tick
    last_tick_ms: Option<u64>,
    /// Last logged fault per button
    faults: [Option<ButtonFault>; BUTTON_COUNT],
}

impl<S, L, P, I> Dashboard<S, L, P, I>
where
    S: DrawSurface,
    L: IndicatorLed,
    P: MemoryProbe,
    I: InputPin,
{
    /// Create a new dashboard
    pub fn new(
        scheduler: CycleScheduler<S, L>,
        input: InputController,
        buttons: ButtonBank<I>,
        memory: MemoryMonitor<P>,
        clock: WallClock,
    ) -> Self {
        Self {
            scheduler,
            input,
            buttons,
            memory,
            clock,
            connectivity: ConnectivityState::Disconnected,
            last_tick_ms: None,
            faults: [None; BUTTON_COUNT],
        }
    }

    /// Run forever
    pub async fn run(mut self) -> ! {
        if let Err(e) = self.scheduler.splash() {
            warn!("Splash screen incomplete: {}", e);
        }

        info!(
            "Dashboard running: {} workspaces, starting at '{}'",
            self.scheduler.registry().len(),
            self.scheduler.current().name.as_str()
        );

        loop {
            match select(TICK_SIGNAL.wait(), CONNECTIVITY_STATE.wait()).await {
                Either::First(now_ms) => self.on_tick(now_ms),
                Either::Second(state) => self.connectivity = state,
            }
        }
    }

    fn on_tick(&mut self, now_ms: u64) {
        let levels = self.buttons.read();
        if let Some(action) = self.input.poll(now_ms, levels) {
            debug!("Action: {}", action);
            self.scheduler.submit(action);
        }
        self.log_button_faults();

        if let Some(freed) = self.memory.poll(now_ms) {
            trace!("Reclaimed {} bytes", freed);
        }

        // Coalesced tick signals still count towards the dwell time
        let delta_ms = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last).min(u32::MAX as u64) as u32);
        self.last_tick_ms = Some(now_ms);

        let env = TickEnv {
            now: self.clock.now(now_ms),
            connectivity: self.connectivity,
            delta_ms,
        };
        let report = self.scheduler.tick(&env, &mut self.memory);
        self.log_report(&report);
    }

    fn log_report(&self, report: &TickReport) {
        match report.transition {
            Transition::Stay => {}
            Transition::Advanced { from, to } | Transition::Jumped { from, to } => {
                debug!(
                    "Workspace {} -> {} '{}'",
                    from,
                    to,
                    self.scheduler.current().name.as_str()
                );
            }
            Transition::AutoCycle(enabled) => info!("Auto-cycle {}", enabled),
            Transition::DiagnosticsUnavailable => {
                info!("No system workspace configured, ignoring diagnostics request")
            }
        }

        if let Err(e) = report.render {
            warn!(
                "Render failed on '{}': {}",
                self.scheduler.current().name.as_str(),
                e
            );
        }
        if let Err(e) = report.present {
            warn!("Display present failed: {}", e);
        }
        if let Err(e) = report.indicator {
            warn!("Indicator LED update failed: {}", e);
        }
    }

    fn log_button_faults(&mut self) {
        for button in Button::ALL {
            let fault = self.input.fault(button);
            let last = &mut self.faults[button.index()];
            if fault == *last {
                continue;
            }
            match fault {
                Some(f) => warn!("Button {} excluded: {}", button, f),
                None => info!("Button {} recovered", button),
            }
            *last = fault;
        }
    }
}
