//! Offline backend
//!
//! Used when the CYW43 radio did not come up at boot. Every attempt fails
//! with `RadioUnavailable`; the monitor treats that like any other failed
//! attempt and keeps retrying on its backoff schedule.

use picodash_core::config::WifiCredentials;
use picodash_core::connectivity::ConnectivityError;
use picodash_core::traits::{ConnectivityBackend, LinkStatus};

/// Backend for boards without a usable radio
pub struct OfflineBackend {
    attempted: bool,
}

impl OfflineBackend {
    /// Create a new offline backend
    pub const fn new() -> Self {
        Self { attempted: false }
    }
}

impl ConnectivityBackend for OfflineBackend {
    fn begin_connect(&mut self, _credentials: &WifiCredentials) -> Result<(), ConnectivityError> {
        self.attempted = true;
        Err(ConnectivityError::RadioUnavailable)
    }

    fn status(&mut self) -> LinkStatus {
        if self.attempted {
            LinkStatus::Failed(ConnectivityError::RadioUnavailable)
        } else {
            LinkStatus::Idle
        }
    }

    fn disconnect(&mut self) {
        self.attempted = false;
    }
}
