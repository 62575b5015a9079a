//! CYW43439 backend
//!
//! Joining a network is async and can take seconds, so the backend never
//! talks to the radio itself. It posts [`LinkRequest`]s to the link task
//! and reads back the status that task publishes.

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH1, PIO0};
use embassy_rp::pio::{Common, InterruptHandler, Pio};
use embassy_time::{with_timeout, Duration};
use static_cell::StaticCell;

use picodash_core::config::WifiCredentials;
use picodash_core::connectivity::ConnectivityError;
use picodash_core::traits::{ConnectivityBackend, LinkStatus};
use picodash_hal_rp2040::pins::Radio;

use super::{link_status, publish, LinkRequest};
use crate::channels::LINK_REQUEST;
use crate::tasks;

// Radio firmware is flashed once, separately from the program:
//   probe-rs download 43439A0.bin --binary-format bin --chip RP2040 --base-address 0x10100000
//   probe-rs download 43439A0_clm.bin --binary-format bin --chip RP2040 --base-address 0x10140000
const FIRMWARE_ADDR: usize = 0x1010_0000;
const FIRMWARE_LEN: usize = 230_321;
const CLM_ADDR: usize = 0x1014_0000;
const CLM_LEN: usize = 4_752;

/// Upper bound on firmware upload and CLM load
const INIT_TIMEOUT: Duration = Duration::from_secs(5);

pub type RadioRunner =
    cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH1>>;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static PIO_COMMON: StaticCell<Common<'static, PIO0>> = StaticCell::new();

/// Why the radio was not brought up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Firmware or CLM region is blank
    FirmwareMissing,
    /// The chip did not answer in time
    InitTimeout,
    /// Runner or link task could not be spawned
    Spawn,
}

/// Firmware and CLM blobs, if they have been flashed
fn firmware() -> Option<(&'static [u8], &'static [u8])> {
    // SAFETY: both regions are XIP flash between the program image and the
    // config partition; nothing writes them at runtime.
    let (fw, clm) = unsafe {
        (
            core::slice::from_raw_parts(FIRMWARE_ADDR as *const u8, FIRMWARE_LEN),
            core::slice::from_raw_parts(CLM_ADDR as *const u8, CLM_LEN),
        )
    };

    let erased = |blob: &[u8]| blob.iter().take(16).all(|&b| b == 0xFF);
    if erased(fw) || erased(clm) {
        None
    } else {
        Some((fw, clm))
    }
}

/// Power up the radio, load its firmware and start the radio tasks
pub async fn start_radio(spawner: Spawner, radio: Radio) -> Result<Cyw43Backend, RadioError> {
    let (fw, clm) = firmware().ok_or(RadioError::FirmwareMissing)?;

    let pwr = Output::new(radio.pwr, Level::Low);
    let cs = Output::new(radio.cs, Level::High);
    let Pio {
        common, sm0, irq0, ..
    } = Pio::new(radio.pio, Irqs);
    let common = PIO_COMMON.init(common);
    let spi = PioSpi::new(
        common,
        sm0,
        DEFAULT_CLOCK_DIVIDER,
        irq0,
        cs,
        radio.dio,
        radio.clk,
        radio.dma,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (device, mut control, runner) = with_timeout(INIT_TIMEOUT, cyw43::new(state, pwr, spi, fw))
        .await
        .map_err(|_| RadioError::InitTimeout)?;

    if let Err(e) = spawner.spawn(tasks::radio_runner_task(runner)) {
        error!("Failed to spawn radio runner: {}", e);
        return Err(RadioError::Spawn);
    }

    with_timeout(INIT_TIMEOUT, control.init(clm))
        .await
        .map_err(|_| RadioError::InitTimeout)?;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    if let Err(e) = spawner.spawn(tasks::link_task(control, device)) {
        error!("Failed to spawn link task: {}", e);
        return Err(RadioError::Spawn);
    }

    info!("CYW43 radio ready");
    Ok(Cyw43Backend::new())
}

/// Backend that hands work to the link task
pub struct Cyw43Backend {
    _private: (),
}

impl Cyw43Backend {
    fn new() -> Self {
        publish(LinkStatus::Idle);
        Self { _private: () }
    }
}

impl ConnectivityBackend for Cyw43Backend {
    fn begin_connect(&mut self, credentials: &WifiCredentials) -> Result<(), ConnectivityError> {
        publish(LinkStatus::Joining);
        LINK_REQUEST.signal(LinkRequest::Join(credentials.clone()));
        Ok(())
    }

    fn status(&mut self) -> LinkStatus {
        link_status()
    }

    fn disconnect(&mut self) {
        publish(LinkStatus::Idle);
        LINK_REQUEST.signal(LinkRequest::Leave);
    }
}
