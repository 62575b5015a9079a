//! Peripheral failures

/// A peripheral could not be driven or read
///
/// Never fatal: callers log it and carry on without the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    /// Peripheral missing or not initialized
    Unavailable,
    /// Bus transfer failed
    Bus,
}
