//! Connectivity backends
//!
//! The monitor drives a [`RadioBackend`]: the CYW43 radio when it came up
//! at boot, otherwise [`OfflineBackend`], which reports the radio missing
//! so the monitor still runs its retry schedule.

mod offline;
mod radio;

pub use offline::OfflineBackend;
pub use radio::{start_radio, Cyw43Backend, RadioError, RadioRunner};

use picodash_core::config::WifiCredentials;
use picodash_core::connectivity::ConnectivityError;
use picodash_core::traits::{ConnectivityBackend, LinkStatus};

use crate::channels::LINK_STATUS;

/// Request from the backend to the link task
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkRequest {
    Join(WifiCredentials),
    Leave,
}

/// Publish the link status for [`ConnectivityBackend::status`] to read
pub fn publish(status: LinkStatus) {
    LINK_STATUS.lock(|s| s.set(status));
}

/// Last published link status
pub fn link_status() -> LinkStatus {
    LINK_STATUS.lock(|s| s.get())
}

/// Backend selected at boot
pub enum RadioBackend {
    Cyw43(Cyw43Backend),
    Offline(OfflineBackend),
}

impl ConnectivityBackend for RadioBackend {
    fn begin_connect(&mut self, credentials: &WifiCredentials) -> Result<(), ConnectivityError> {
        match self {
            RadioBackend::Cyw43(radio) => radio.begin_connect(credentials),
            RadioBackend::Offline(offline) => offline.begin_connect(credentials),
        }
    }

    fn status(&mut self) -> LinkStatus {
        match self {
            RadioBackend::Cyw43(radio) => radio.status(),
            RadioBackend::Offline(offline) => offline.status(),
        }
    }

    fn disconnect(&mut self) {
        match self {
            RadioBackend::Cyw43(radio) => radio.disconnect(),
            RadioBackend::Offline(offline) => offline.disconnect(),
        }
    }
}
