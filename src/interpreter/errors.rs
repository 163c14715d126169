//! Runtime error types for the tape interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse errors or unreadable sources).
//!
//! All runtime errors are fatal for the current file - they halt its execution,
//! leave the tape as it was at the failing operation, and are reported to the caller.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Cursor moved off either end of the tape
    TapeBoundsExceeded {
        attempted: i64,
        tape_len: usize,
        location: SourceLocation,
    },

    /// Input ran out and the end-of-input policy is to fail
    InputExhausted { location: SourceLocation },

    /// Reading standard input or writing standard output failed
    Io {
        message: String,
        location: Option<SourceLocation>,
    },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::TapeBoundsExceeded { location, .. } => Some(location),
            RuntimeError::InputExhausted { location } => Some(location),
            RuntimeError::Io { location, .. } => location.as_ref(),
            RuntimeError::SnapshotLimitExceeded { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TapeBoundsExceeded {
                attempted,
                tape_len,
                location,
            } => {
                write!(
                    f,
                    "Tape bounds exceeded at line {}, column {}: cell {} is outside 0..{}",
                    location.line, location.column, attempted, tape_len
                )
            }
            RuntimeError::InputExhausted { location } => {
                write!(
                    f,
                    "Input exhausted at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::Io { message, location } => {
                if let Some(loc) = location {
                    write!(
                        f,
                        "I/O error at line {}, column {}: {}",
                        loc.line, loc.column, message
                    )
                } else {
                    write!(f, "I/O error: {}", message)
                }
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes needed, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = RuntimeError::TapeBoundsExceeded {
            attempted: -1,
            tape_len: 30_000,
            location: SourceLocation::new(3, 7),
        };
        assert_eq!(
            err.to_string(),
            "Tape bounds exceeded at line 3, column 7: cell -1 is outside 0..30000"
        );
        assert_eq!(err.location(), Some(&SourceLocation::new(3, 7)));

        let err = RuntimeError::Io {
            message: "broken pipe".to_string(),
            location: None,
        };
        assert_eq!(err.to_string(), "I/O error: broken pipe");
        assert_eq!(err.location(), None);
    }
}
