//! PicoDash - Workspace Display Firmware
//!
//! Main firmware binary for a Raspberry Pi Pico W with a Pimoroni
//! Display Pack. Cycles through configured workspaces on the 240x135
//! panel, driven by the A/B/X/Y buttons, with the RGB LED showing the
//! category of the current screen.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use picodash_core::clock::WallClock;
use picodash_core::config::{parse_config, ConfigError, DeviceConfig, WifiCredentials};
use picodash_core::connectivity::ConnectivityMonitor;
use picodash_core::input::InputController;
use picodash_core::memory::MemoryMonitor;
use picodash_core::scheduler::CycleScheduler;
use picodash_core::status::StatusIndicator;
use picodash_core::workspace::WorkspaceRegistry;
use picodash_drivers::display::{Backlight, Framebuffer, Panel, PanelGeometry, St7789};
use picodash_drivers::input::{ButtonBank, ButtonPin};
use picodash_drivers::led::{OptionalLed, RgbLed};
use picodash_hal::FlashError;
use picodash_hal_rp2040::flash::Rp2040FlashStorage;
use picodash_hal_rp2040::gpio::{RpInput, RpOutput};
use picodash_hal_rp2040::pins::{Board, DisplayPack, PinBank};
use picodash_hal_rp2040::pwm::{slice_config, RpPwm};

use crate::config::{ConfigPersistence, LoadError};
use crate::dashboard::Dashboard;
use crate::heap::HeapProbe;
use crate::net::{OfflineBackend, RadioBackend};

/// Embedded default configuration (compiled into firmware)
/// Edit workspaces.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../workspaces.toml");

/// SPI clock for the panel
const PANEL_SPI_HZ: u32 = 62_500_000;

mod channels;
mod config;
mod dashboard;
mod heap;
mod net;
mod tasks;

// Lives for the whole program; too large for the task future
static DEVICE_CONFIG: StaticCell<DeviceConfig> = StaticCell::new();

type Led = OptionalLed<RgbLed<RpPwm<'static>, RpPwm<'static>, RpPwm<'static>>>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PicoDash firmware starting...");

    heap::init_heap();

    let p = embassy_rp::init(Default::default());
    let Board {
        pack,
        radio,
        mut pins,
        flash,
        flash_dma,
    } = Board::split(p);
    info!("Peripherals initialized");

    // Configuration: flash, then embedded default, then built-in minimal
    let mut persistence = ConfigPersistence::new(Rp2040FlashStorage::new(flash, flash_dma));
    let (device, config_error) = load_config(&mut persistence).await;
    let device = DEVICE_CONFIG.init(device);
    let credentials = load_credentials(&mut persistence, device.wifi.clone()).await;

    let registry = match config_error {
        Some(e) => WorkspaceRegistry::fallback(&e),
        None => {
            let (registry, error) = WorkspaceRegistry::load_or_fallback(&device.workspaces);
            if let Some(e) = error {
                warn!("Workspace configuration rejected: {}", e);
            }
            registry
        }
    };
    if registry.is_fallback() {
        warn!("Showing diagnostics workspace only");
    } else {
        info!("{} workspaces loaded", registry.len());
    }

    let BoardOutputs {
        panel,
        led,
        backlight: _backlight,
    } = init_outputs(pack, device);
    let buttons = init_buttons(&mut pins, device);

    // The radio firmware is read over XIP; start it after the config writes
    let backend = match net::start_radio(spawner, radio).await {
        Ok(radio) => RadioBackend::Cyw43(radio),
        Err(e) => {
            warn!("Radio unavailable ({}), WiFi stays offline", e);
            RadioBackend::Offline(OfflineBackend::new())
        }
    };

    // Spawn tasks
    let monitor = ConnectivityMonitor::new(backend, credentials, device.connectivity);
    if let Err(e) = spawner.spawn(tasks::connectivity_task(
        monitor,
        device.connectivity.poll_interval_ms,
    )) {
        error!("Failed to spawn connectivity task: {}", e);
    }
    if let Err(e) = spawner.spawn(tasks::tick_task(device.display.tick_ms)) {
        error!("Failed to spawn tick task: {}", e);
    }

    let scheduler = CycleScheduler::new(
        registry,
        device.display.tick_ms,
        device.display.auto_cycle,
        panel,
        StatusIndicator::new(led, device.indicator.brightness),
    )
    .with_transition(device.display.transition_ms);

    info!("All tasks spawned, dashboard running");

    Dashboard::new(
        scheduler,
        InputController::new(&device.input),
        buttons,
        MemoryMonitor::new(HeapProbe, device.memory),
        WallClock::from_config(&device.clock),
    )
    .run()
    .await
}

/// Load the configuration, returning an error to show on screen
///
/// A flash config that fails to parse is shown as an error rather than
/// silently replaced, so the uploaded file can be fixed.
async fn load_config(
    persistence: &mut ConfigPersistence<'_>,
) -> (DeviceConfig, Option<ConfigError>) {
    match persistence.load().await {
        Ok(config) => {
            info!("Loaded configuration from flash");
            return (config, None);
        }
        Err(LoadError::Parse(e)) => {
            warn!("Flash configuration invalid at line {}", e.line);
            return (DeviceConfig::new(), Some(ConfigError::Parse(e)));
        }
        Err(LoadError::Flash(FlashError::NotFound)) => {
            info!("No configuration in flash, storing embedded default");
            if let Err(e) = persistence.store(EMBEDDED_CONFIG).await {
                warn!("Could not store default configuration: {}", e);
            }
        }
        Err(LoadError::Flash(FlashError::Storage)) => {
            warn!("Config partition unreadable, erasing");
            if let Err(e) = persistence.erase().await {
                warn!("Erase failed: {}", e);
            } else if let Err(e) = persistence.store(EMBEDDED_CONFIG).await {
                warn!("Could not store default configuration: {}", e);
            }
        }
        Err(e) => {
            warn!("Flash configuration unusable: {}, using embedded default", e);
        }
    }

    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            (config, None)
        }
        Err(e) => {
            // Only possible if build-time validation and the parser disagree
            error!("Failed to parse embedded config: {}", e);
            (DeviceConfig::new(), Some(ConfigError::Parse(e)))
        }
    }
}

/// Flash credentials take precedence over the `[wifi]` section
async fn load_credentials(
    persistence: &mut ConfigPersistence<'_>,
    from_toml: Option<WifiCredentials>,
) -> Option<WifiCredentials> {
    match persistence.load_credentials().await {
        Ok(Some(credentials)) => {
            info!("Using WiFi credentials from flash");
            Some(credentials)
        }
        Ok(None) => from_toml,
        Err(e) => {
            warn!("Stored WiFi credentials unreadable: {}", e);
            from_toml
        }
    }
}

type DisplaySpi = Spi<'static, embassy_rp::peripherals::SPI0, spi::Blocking>;

struct BoardOutputs {
    panel: Panel<'static, DisplaySpi, RpOutput<'static>, RpOutput<'static>>,
    led: Led,
    backlight: Option<Backlight<RpPwm<'static>>>,
}

/// Panel, LED and backlight on their fixed Display Pack pins
fn init_outputs(pack: DisplayPack, device: &DeviceConfig) -> BoardOutputs {
    let mut spi_config = spi::Config::default();
    spi_config.frequency = PANEL_SPI_HZ;
    let spi = Spi::new_blocking_txonly(pack.spi, pack.clk, pack.mosi, spi_config);

    let cs = RpOutput::new(pack.cs.into(), true);
    let dc = RpOutput::new(pack.dc.into(), false);
    let mut lcd = St7789::new(spi, cs, dc, PanelGeometry::DISPLAY_PACK);
    match lcd.init(&mut Delay) {
        Ok(()) => info!("Display initialized"),
        Err(e) => warn!("Display init failed: {}", e),
    }

    let geometry = PanelGeometry::DISPLAY_PACK;
    let len = geometry.width as usize * geometry.height as usize;
    let pixels: &'static mut [u16] = alloc::vec![0u16; len].leak();
    let panel = Framebuffer::new(pixels, geometry.width, geometry.height)
        .and_then(|fb| Panel::new(fb, lcd));
    let Some(panel) = panel else {
        defmt::panic!("Framebuffer does not match the panel");
    };

    let (r, g) =
        Pwm::new_output_ab(pack.led_rg_slice, pack.led_r, pack.led_g, slice_config()).split();
    let (b, _) = Pwm::new_output_a(pack.led_b_slice, pack.led_b, slice_config()).split();
    let led: Led = match (r, g, b) {
        (Some(r), Some(g), Some(b)) => OptionalLed::present(RgbLed::new_common_anode(
            RpPwm::new(r),
            RpPwm::new(g),
            RpPwm::new(b),
        )),
        _ => {
            warn!("LED PWM unavailable, running without indicator");
            OptionalLed::absent()
        }
    };

    let (bl, _) = Pwm::new_output_a(pack.backlight_slice, pack.backlight, slice_config()).split();
    let backlight = bl.map(|out| Backlight::new(RpPwm::new(out), device.display.brightness));
    if backlight.is_none() {
        warn!("Backlight PWM unavailable");
    }

    BoardOutputs {
        panel,
        led,
        backlight,
    }
}

/// Buttons on the pins named in `[input]`
fn init_buttons(pins: &mut PinBank, device: &DeviceConfig) -> ButtonBank<RpInput<'static>> {
    let mut buttons = [None, None, None, None];

    for (slot, config) in buttons.iter_mut().zip(device.input.buttons.iter()) {
        let Some(config) = config else {
            continue;
        };
        match pins.take(config.pin) {
            Ok(pin) => {
                let input = RpInput::new(pin, config.pull_up);
                *slot = Some(ButtonPin::from_config(input, config));
            }
            Err(e) => warn!("Button pin gpio{} unavailable: {}", config.pin, e),
        }
    }

    ButtonBank::new(buttons)
}
