//! Memory model for the tape interpreter
//!
//! - [`tape`]: fixed-length array of byte cells plus a movable cursor
//!
//! # Cells
//!
//! Every cell is a `u8`. Arithmetic wraps modulo 256, so decrementing a zero
//! cell yields 255 and incrementing 255 yields 0.
//!
//! # Cursor
//!
//! The cursor starts on cell 0. Moves are bounds-checked: stepping off either
//! end of the tape is reported as an error and leaves the cursor where it was.

pub mod tape;

pub use tape::{Tape, TapeBoundsError};

/// Number of cells on a freshly allocated tape
pub const DEFAULT_TAPE_LEN: usize = 30_000;
