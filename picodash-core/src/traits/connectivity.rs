//! Connectivity backend trait
//!
//! The radio driver and network stack live behind this trait. The
//! [`ConnectivityMonitor`](crate::connectivity::ConnectivityMonitor) drives
//! it; nothing else touches the backend.

use crate::config::WifiCredentials;
use crate::connectivity::ConnectivityError;

/// Link state as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// No association in progress
    Idle,
    /// Association/DHCP in progress
    Joining,
    /// Link is up
    Up,
    /// The last attempt failed or the link dropped
    Failed(ConnectivityError),
}

/// Radio and network stack collaborator
pub trait ConnectivityBackend {
    /// Start joining a network
    ///
    /// Must return promptly; progress is observed through [`status`](Self::status).
    fn begin_connect(&mut self, credentials: &WifiCredentials) -> Result<(), ConnectivityError>;

    /// Current link status (non-blocking)
    fn status(&mut self) -> LinkStatus;

    /// Drop the link or abandon an attempt in progress
    fn disconnect(&mut self);
}
