//! Per-file driver: read, parse, render, execute.
//!
//! Files are processed strictly one after another. A file that cannot be read,
//! fails to parse, or fails at runtime is reported and the batch moves on to
//! the next path. Standard input is shared by every file in the batch.

use crate::config::Config;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::parser::ast::Program;
use crate::parser::parser::{ParseError, Parser};
use crate::serializer::Serializer;
use crate::snapshot::SnapshotManager;
use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Why a file could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    UnreadableSource { path: PathBuf, message: String },
    Parse { path: PathBuf, error: ParseError },
    Runtime { path: PathBuf, error: RuntimeError },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::UnreadableSource { path, .. }
            | FileError::Parse { path, .. }
            | FileError::Runtime { path, .. } => path,
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::UnreadableSource { path, message } => {
                write!(f, "{}: cannot read source: {}", path.display(), message)
            }
            FileError::Parse { path, error } => write!(f, "{}: {}", path.display(), error),
            FileError::Runtime { path, error } => write!(f, "{}: {}", path.display(), error),
        }
    }
}

impl std::error::Error for FileError {}

/// Everything produced by executing one file
#[derive(Debug)]
pub struct Execution {
    pub source: String,
    pub program: Program,
    /// Recorded only when [`Config::debug`] is set
    pub history: Option<SnapshotManager>,
    pub outcome: Result<(), RuntimeError>,
}

/// Read and parse `path`.
///
/// Only a failure to read the file is [`FileError::UnreadableSource`]; bytes
/// that are not UTF-8 are reported by the parser like other stray characters.
pub fn load(path: &Path, config: &Config) -> Result<(String, Program), FileError> {
    let bytes = fs::read(path).map_err(|e| FileError::UnreadableSource {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    // Invalid UTF-8 becomes U+FFFD, which the lexer treats like any other
    // character outside the alphabet
    let source = String::from_utf8_lossy(&bytes).into_owned();

    let program = Parser::new(&source)
        .allow_comments(config.allow_comments)
        .parse_program()
        .map_err(|error| FileError::Parse {
            path: path.to_path_buf(),
            error,
        })?;

    Ok((source, program))
}

/// Load `path`, print its rendered tree, then execute it.
///
/// Runtime failures are returned inside [`Execution::outcome`] so a partial
/// history is still available to the caller.
pub fn run_file<R: Read, W: Write>(
    path: &Path,
    config: &Config,
    input: R,
    mut output: W,
) -> Result<Execution, FileError> {
    if config.verbose {
        eprintln!("Parsing {}...", path.display());
    }
    let (source, program) = load(path, config)?;
    if config.verbose {
        eprintln!(
            "Parsed successfully. Found {} top-level nodes ({} total).",
            program.nodes.len(),
            program.node_count()
        );
    }

    if config.print_tree {
        output
            .write_all(Serializer::render(&program).as_bytes())
            .map_err(|e| FileError::Runtime {
                path: path.to_path_buf(),
                error: RuntimeError::Io {
                    message: e.to_string(),
                    location: None,
                },
            })?;
    }

    let mut interpreter = Interpreter::new(input, &mut output)
        .with_tape_len(config.tape_len)
        .with_eof(config.eof);
    if config.debug {
        interpreter = interpreter.with_history(config.history_limit);
    }

    if config.verbose {
        eprintln!("Executing {}...", path.display());
    }
    let outcome = interpreter.run(&program);
    let history = interpreter.take_history();
    drop(interpreter);

    // Partial output from a failed run should still reach the reader
    let flushed = output.flush().map_err(|e| RuntimeError::Io {
        message: e.to_string(),
        location: None,
    });
    let outcome = outcome.and(flushed);

    if config.verbose {
        match &outcome {
            Ok(()) => eprintln!("Execution completed successfully."),
            Err(_) => eprintln!("Execution stopped early."),
        }
        if let Some(history) = &history {
            eprintln!("Total snapshots: {}", history.len());
        }
    }

    Ok(Execution {
        source,
        program,
        history,
        outcome,
    })
}

/// Run every path in order, calling `after_each` for each file that executed.
///
/// Returns the failures in the order they happened; an empty list means every
/// file parsed and ran to completion.
pub fn run_files<R: Read, W: Write, F>(
    paths: &[PathBuf],
    config: &Config,
    mut input: R,
    mut output: W,
    mut after_each: F,
) -> Vec<FileError>
where
    F: FnMut(&Path, Execution),
{
    let mut failures = Vec::new();

    for path in paths {
        match run_file(path, config, &mut input, &mut output) {
            Ok(execution) => {
                if let Err(error) = &execution.outcome {
                    let failure = FileError::Runtime {
                        path: path.clone(),
                        error: error.clone(),
                    };
                    eprintln!("{}", failure);
                    failures.push(failure);
                }
                after_each(path, execution);
            }
            Err(failure) => {
                eprintln!("{}", failure);
                failures.push(failure);
            }
        }
    }

    failures
}
