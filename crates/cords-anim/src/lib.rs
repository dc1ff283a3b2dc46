//! Frame-driven animations for the cords launch sequence.
//!
//! Every animation here is advanced with millisecond timestamps from a
//! [`FrameClock`] and renders to ratatui lines or directly into a frame.
//! The rising cord field is the only stateful simulation; reveals, the
//! countdown and the progress indicator are small timed state machines
//! built from [`Tween`], [`Ticker`] and [`Stages`].

mod animations;
mod chars;
mod color;
mod easing;
mod timing;

pub use animations::countdown::{
    CAPTION_COMPLETED, CAPTION_COUNTING, COUNTDOWN_START, Countdown,
};
pub use animations::field::{self, Cord, CordField, Dice, FieldGrid, FieldParams};
pub use animations::progress::{ProgressIndicator, indicator_width};
pub use animations::reveal::{RevealLayers, TextReveal, art_width};
pub use color::{blend, fade, tinted};
pub use easing::{Tween, ease};
pub use timing::{FrameClock, Stages, Ticker};
