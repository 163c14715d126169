//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source display with per-command coloring and the current node marked
//! - [`tape`]: Tape cells around the cursor
//! - [`terminal`]: Bytes written by Output operations up to the current step
//! - [`status`]: Status bar with keybindings and execution state
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed state and only mutates its own scroll state.

pub mod source;
pub mod status;
pub mod tape;
pub mod terminal;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tape::render_tape_pane;
pub use terminal::render_terminal_pane;
