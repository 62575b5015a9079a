//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod connectivity;
pub mod radio;
pub mod tick;

pub use connectivity::connectivity_task;
pub use radio::{link_task, radio_runner_task};
pub use tick::tick_task;
