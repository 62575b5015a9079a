//! Status indicator LED

mod indicator;

pub use indicator::StatusIndicator;
