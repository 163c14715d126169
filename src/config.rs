//! Run options shared by the runner, the interpreter and the debugger.

use crate::memory::DEFAULT_TAPE_LEN;
use clap::ValueEnum;

/// Default snapshot budget for `--debug` runs, in MiB
pub const DEFAULT_HISTORY_LIMIT_MIB: usize = 256;

/// What an Input operation stores when standard input is exhausted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EofBehavior {
    /// Leave the cell as it was
    #[default]
    Unchanged,
    /// Store 0
    Zero,
    /// Store 255
    Max,
    /// Abort execution with an input-exhausted error
    Error,
}

/// Options for processing one or more source files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Skip characters outside the alphabet instead of rejecting them
    pub allow_comments: bool,
    pub eof: EofBehavior,
    pub tape_len: usize,
    /// Print the rendered tree before executing
    pub print_tree: bool,
    /// Record a snapshot history and open the debugger after each file
    pub debug: bool,
    /// Snapshot budget in bytes
    pub history_limit: usize,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            allow_comments: false,
            eof: EofBehavior::default(),
            tape_len: DEFAULT_TAPE_LEN,
            print_tree: true,
            debug: false,
            history_limit: DEFAULT_HISTORY_LIMIT_MIB * 1024 * 1024,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tape_len, 30_000);
        assert_eq!(config.eof, EofBehavior::Unchanged);
        assert!(config.print_tree);
        assert!(!config.allow_comments);
        assert!(!config.debug);
    }

    #[test]
    fn test_eof_names() {
        assert_eq!(EofBehavior::from_str("zero", true), Ok(EofBehavior::Zero));
        assert_eq!(EofBehavior::from_str("max", true), Ok(EofBehavior::Max));
        assert!(EofBehavior::from_str("minus-one", true).is_err());
    }
}
