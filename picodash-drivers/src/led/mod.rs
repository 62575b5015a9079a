//! Indicator LED drivers

pub mod optional;
pub mod rgb;

pub use optional::OptionalLed;
pub use rgb::RgbLed;
