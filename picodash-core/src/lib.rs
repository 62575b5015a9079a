//! Board-agnostic core logic for the PicoDash display device
//!
//! This crate contains everything that does not touch real hardware:
//!
//! - Hardware abstraction traits (draw surface, indicator LED, radio, memory)
//! - Workspace registry and its validation
//! - Renderers and the dispatcher that routes draws to them
//! - Cycle scheduler (auto-cycle and user actions)
//! - Connectivity state machine with capped exponential backoff
//! - Button debouncing into semantic actions
//! - Status indicator and memory monitor
//! - Configuration types and the TOML subset parser

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod color;
pub mod config;
pub mod connectivity;
pub mod input;
pub mod memory;
pub mod render;
pub mod scheduler;
pub mod status;
pub mod traits;
pub mod workspace;
