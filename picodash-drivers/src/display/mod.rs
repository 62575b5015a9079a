//! Display drivers
//!
//! The engine draws into a [`Framebuffer`] through the `DrawSurface`
//! trait; [`Panel`] pairs it with an [`St7789`] and pushes the whole
//! buffer on `present`.

mod backlight;
mod framebuffer;
mod panel;
mod st7789;

pub use backlight::Backlight;
pub use framebuffer::{to_rgb565, Framebuffer};
pub use panel::Panel;
pub use st7789::{PanelGeometry, St7789};
