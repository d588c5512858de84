//! Utility functions and helpers.

pub mod clock;
pub mod console;
pub mod http;
pub mod text;

pub use clock::{Clock, ManualClock, SystemClock};
