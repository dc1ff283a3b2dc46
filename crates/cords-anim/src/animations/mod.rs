//! Individual animations driven by frame timestamps.

pub mod countdown;
pub mod field;
pub mod progress;
pub mod reveal;
