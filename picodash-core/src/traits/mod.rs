//! Hardware abstraction traits
//!
//! These traits are the seams between the engine and the collaborators
//! it does not own: the display driver, the indicator LED, the radio and
//! the allocator.

pub mod connectivity;
pub mod hardware;
pub mod indicator;
pub mod memory;
pub mod surface;

pub use connectivity::{ConnectivityBackend, LinkStatus};
pub use hardware::HardwareError;
pub use indicator::IndicatorLed;
pub use memory::MemoryProbe;
pub use surface::{DrawSurface, TextSize};
