//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in picodash-core, written against the picodash-hal pin traits:
//!
//! - Display (RGB565 framebuffer, ST7789 panel, PWM backlight)
//! - Indicator LED (common-anode or common-cathode RGB over PWM)
//! - Input (button bank with per-pin inversion)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod led;
