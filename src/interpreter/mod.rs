//! Tape interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`engine::Interpreter`], a [`Visitor`](crate::parser::ast::Visitor)
//!   that executes the AST
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! A program starts on a zeroed tape with the cursor on cell 0. Command nodes
//! apply their operation `count` times in a row; a loop re-reads the cell under
//! the cursor before every pass and stops once it is zero. There is no
//! iteration bound, so a loop that never clears its guard cell runs forever.
//! When every top-level node has run, a newline is written and execution halts.
//!
//! When history recording is enabled, a snapshot is taken before every command,
//! at every loop guard, and at halt, for the debugger to step through.

pub mod engine;
pub mod errors;

pub use engine::Interpreter;
pub use errors::RuntimeError;
