//! Button input drivers

pub mod buttons;

pub use buttons::{ButtonBank, ButtonPin};
