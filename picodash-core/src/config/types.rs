//! Configuration type definitions

use heapless::{String, Vec};

use crate::workspace::Params;

/// Maximum number of configured workspaces
pub const MAX_WORKSPACES: usize = 12;

/// Maximum workspace name length
pub const MAX_NAME_LEN: usize = 24;

/// Maximum renderer identifier length
pub const MAX_RENDERER_ID_LEN: usize = 24;

/// Maximum SSID length (IEEE 802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 63;

/// Minimum WPA2 passphrase length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Physical buttons on the Display Pack (A, B, X, Y)
pub const BUTTON_COUNT: usize = 4;

/// Display time used when a workspace does not set one (seconds)
pub const DEFAULT_DISPLAY_TIME_S: i32 = 5;

/// One workspace entry exactly as written in the configuration
///
/// Nothing here is validated; see
/// [`WorkspaceRegistry::load`](crate::workspace::WorkspaceRegistry::load).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawWorkspace {
    /// Display name
    pub name: String<MAX_NAME_LEN>,
    /// Dwell time in seconds, if set
    pub display_time_s: Option<i32>,
    /// Renderer identifier
    pub renderer: String<MAX_RENDERER_ID_LEN>,
    /// Every other key of the entry
    pub params: Params,
}

/// WiFi network credentials
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WifiCredentials {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_PASSWORD_LEN>,
}

impl WifiCredentials {
    /// Build credentials, returning `None` if either field is too long
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        Some(Self {
            ssid: String::try_from(ssid).ok()?,
            password: String::try_from(password).ok()?,
        })
    }

    /// Check that the credentials can be used to join a network
    ///
    /// The SSID must be non-empty. The password is either empty (open
    /// network) or a valid WPA2 passphrase length.
    pub fn is_valid(&self) -> bool {
        let pw = self.password.len();
        !self.ssid.is_empty() && (pw == 0 || pw >= MIN_PASSWORD_LEN)
    }
}

/// GPIO pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO number
    pub pin: u8,
    /// Active-low
    pub inverted: bool,
    /// Enable the internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Active-low input with pull-up, as the Display Pack buttons are wired
    pub const fn active_low(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Button and debounce configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Level must be stable this long before it is accepted
    pub debounce_ms: u32,
    /// A button held longer than this is treated as stuck
    pub stuck_ms: u32,
    /// Pins for A, B, X, Y (`None` = not fitted)
    pub buttons: [Option<PinConfig>; BUTTON_COUNT],
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            stuck_ms: 30_000,
            buttons: [
                Some(PinConfig::active_low(12)),
                Some(PinConfig::active_low(13)),
                Some(PinConfig::active_low(14)),
                Some(PinConfig::active_low(15)),
            ],
        }
    }
}

/// Connectivity monitor tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectivityConfig {
    /// First retry delay
    pub backoff_base_ms: u32,
    /// Retry delay never exceeds this
    pub backoff_ceiling_ms: u32,
    /// An attempt still joining after this long is abandoned
    pub connect_timeout_ms: u32,
    /// How often the monitor is serviced
    pub poll_interval_ms: u32,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            backoff_base_ms: 5_000,
            backoff_ceiling_ms: 60_000,
            connect_timeout_ms: 10_000,
            poll_interval_ms: 500,
        }
    }
}

/// Memory monitor cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MemoryConfig {
    pub sample_interval_ms: u32,
    pub reclaim_interval_ms: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 5_000,
            reclaim_interval_ms: 60_000,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Render tick interval
    pub tick_ms: u32,
    /// Backlight brightness (0-100)
    pub brightness: u8,
    /// Whether auto-cycling is on at boot
    pub auto_cycle: bool,
    /// Slide animation between workspaces (0 = switch instantly)
    pub transition_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            brightness: 50,
            auto_cycle: true,
            transition_ms: 500,
        }
    }
}

/// Indicator LED configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// LED brightness (0-100)
    pub brightness: u8,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self { brightness: 50 }
    }
}

/// Wall clock base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Unix time at boot
    pub epoch_s: u32,
    /// Local offset from UTC in minutes
    pub utc_offset_min: i16,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            // 2021-01-01 00:00:00, where the RP2040 RTC starts
            epoch_s: 1_609_459_200,
            utc_offset_min: 0,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub workspaces: Vec<RawWorkspace, MAX_WORKSPACES>,
    pub wifi: Option<WifiCredentials>,
    pub input: InputConfig,
    pub connectivity: ConnectivityConfig,
    pub memory: MemoryConfig,
    pub display: DisplayConfig,
    pub indicator: IndicatorConfig,
    pub clock: ClockConfig,
}

impl DeviceConfig {
    /// Create an empty configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }
}
