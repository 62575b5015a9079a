//! RP2040-specific HAL for the PicoDash dashboard
//!
//! This crate provides RP2040 implementations of the shared
//! `picodash-hal` traits, plus the Pico W / Display Pack pin map:
//!
//! - GPIO and PWM wrappers over embassy-rp drivers
//! - Display Pack peripheral split with runtime pin lookup for buttons
//! - Flash storage driver (implements `picodash_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod pins;
pub mod pwm;

// Re-export shared traits from picodash-hal for convenience
pub use picodash_hal::{FlashStorage as FlashStorageTrait, StorageKey};
