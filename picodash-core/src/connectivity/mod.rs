//! WiFi connectivity state machine
//!
//! ```text
//!               begin_connect            link up
//!  Disconnected ────────────► Connecting ───────► Connected
//!                               │     ▲               │
//!            failure or timeout ▼     │ backoff over  │ drop
//!                              Retrying ◄─────────────┘
//! ```
//!
//! Without valid credentials the monitor stays `Disconnected`.

mod backoff;
mod monitor;

pub use backoff::Backoff;
pub use monitor::ConnectivityMonitor;

use core::fmt;

/// Connection state as seen by the rest of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectivityState {
    /// Idle; no credentials or not started
    #[default]
    Disconnected,
    /// Join in progress
    Connecting,
    /// Link up
    Connected,
    /// Waiting out a backoff delay before the next attempt
    Retrying {
        /// Consecutive failed attempts (1 = first retry)
        attempt: u8,
        /// Length of this backoff delay
        backoff_ms: u32,
        /// Time already spent waiting
        elapsed_ms: u32,
    },
}

impl ConnectivityState {
    /// True when the link is up
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityState::Connected)
    }

    /// Same state, ignoring how far a backoff wait has got
    ///
    /// Use this to report changes; `Retrying::elapsed_ms` moves on every
    /// poll.
    pub fn same_phase(&self, other: &ConnectivityState) -> bool {
        match (self, other) {
            (
                ConnectivityState::Retrying { attempt: a, .. },
                ConnectivityState::Retrying { attempt: b, .. },
            ) => a == b,
            _ => self == other,
        }
    }

    /// Short label for on-screen status
    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityState::Disconnected => "Disconnected",
            ConnectivityState::Connecting => "Connecting",
            ConnectivityState::Connected => "Connected",
            ConnectivityState::Retrying { .. } => "Retrying",
        }
    }
}

/// Why a connection attempt failed or a link was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectivityError {
    /// Radio missing or failed to initialize
    RadioUnavailable,
    /// Network rejected the credentials
    AuthFailed,
    /// SSID not found
    NoNetwork,
    /// Attempt did not complete in time
    Timeout,
    /// Established link went away
    LinkDropped,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnectivityError::RadioUnavailable => "radio unavailable",
            ConnectivityError::AuthFailed => "authentication failed",
            ConnectivityError::NoNetwork => "network not found",
            ConnectivityError::Timeout => "connect timeout",
            ConnectivityError::LinkDropped => "link dropped",
        })
    }
}
