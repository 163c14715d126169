// Execution engine for the tape interpreter

use crate::config::EofBehavior;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Tape, DEFAULT_TAPE_LEN};
use crate::parser::ast::*;
use crate::snapshot::{Snapshot, SnapshotManager, StepEvent};
use std::io::{self, Read, Write};

/// Walks a [`Program`] and executes it against a byte tape.
///
/// `R` supplies bytes to Input operations and `W` receives Output bytes plus
/// the newline written when execution halts.
pub struct Interpreter<R, W> {
    /// Tape memory, reset at the start of every program
    tape: Tape,

    input: R,
    output: W,

    /// What Input stores once `input` is exhausted
    eof: EofBehavior,

    /// Snapshot budget in bytes; `None` disables history recording
    history_limit: Option<usize>,

    /// History of the current (or last) execution
    history: Option<SnapshotManager>,

    /// Location of the node being executed
    current_location: Option<SourceLocation>,

    /// Whether the last program ran to completion
    finished: bool,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Create an interpreter with a 30,000 cell tape
    pub fn new(input: R, output: W) -> Self {
        Interpreter {
            tape: Tape::new(DEFAULT_TAPE_LEN),
            input,
            output,
            eof: EofBehavior::default(),
            history_limit: None,
            history: None,
            current_location: None,
            finished: false,
        }
    }

    pub fn with_tape_len(mut self, len: usize) -> Self {
        self.tape = Tape::new(len);
        self
    }

    pub fn with_eof(mut self, eof: EofBehavior) -> Self {
        self.eof = eof;
        self
    }

    /// Record a snapshot before every step, using at most `limit` bytes.
    pub fn with_history(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Execute `program` from a fresh tape
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        program.accept(self)
    }

    // ========== Getter methods ==========

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn current_location(&self) -> Option<SourceLocation> {
        self.current_location
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn history(&self) -> Option<&SnapshotManager> {
        self.history.as_ref()
    }

    /// Take ownership of the recorded history, leaving none behind.
    pub fn take_history(&mut self) -> Option<SnapshotManager> {
        self.history.take()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // ========== Execution helpers ==========

    /// Take a snapshot of the current execution state, if recording
    fn take_snapshot(
        &mut self,
        location: Option<SourceLocation>,
        event: StepEvent,
    ) -> Result<(), RuntimeError> {
        if let Some(history) = self.history.as_mut() {
            let snapshot = Snapshot::capture(&self.tape, history.output().len(), location, event);
            history.push(snapshot)?;
        }
        Ok(())
    }

    fn emit(&mut self, byte: u8, location: Option<SourceLocation>) -> Result<(), RuntimeError> {
        self.output
            .write_all(&[byte])
            .map_err(|e| io_error(e, location))?;
        if let Some(history) = self.history.as_mut() {
            history.record_output(byte)?;
        }
        Ok(())
    }

    /// Read one byte into the current cell, applying the end-of-input policy.
    fn read_cell(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        // Prompts written without a newline must be visible before blocking
        self.output.flush().map_err(|e| io_error(e, Some(location)))?;

        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return self.apply_eof(location),
                Ok(_) => {
                    self.tape.set(buf[0]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_error(e, Some(location))),
            }
        }
    }

    fn apply_eof(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        match self.eof {
            EofBehavior::Unchanged => {}
            EofBehavior::Zero => self.tape.set(0),
            EofBehavior::Max => self.tape.set(u8::MAX),
            EofBehavior::Error => return Err(RuntimeError::InputExhausted { location }),
        }
        Ok(())
    }
}

fn io_error(err: io::Error, location: Option<SourceLocation>) -> RuntimeError {
    RuntimeError::Io {
        message: err.to_string(),
        location,
    }
}

impl<R: Read, W: Write> Visitor<Result<(), RuntimeError>> for Interpreter<R, W> {
    fn visit_command(&mut self, node: &CommandNode) -> Result<(), RuntimeError> {
        let location = node.location();
        self.current_location = Some(location);
        self.take_snapshot(
            Some(location),
            StepEvent::Command {
                command: node.command(),
                count: node.count(),
            },
        )?;

        let out_of_bounds = |e: crate::memory::TapeBoundsError| RuntimeError::TapeBoundsExceeded {
            attempted: e.attempted,
            tape_len: e.len,
            location,
        };

        match node.command() {
            Command::Increment => {
                for _ in 0..node.count() {
                    self.tape.increment();
                }
            }
            Command::Decrement => {
                for _ in 0..node.count() {
                    self.tape.decrement();
                }
            }
            Command::ShiftLeft => {
                for _ in 0..node.count() {
                    self.tape.move_left().map_err(out_of_bounds)?;
                }
            }
            Command::ShiftRight => {
                for _ in 0..node.count() {
                    self.tape.move_right().map_err(out_of_bounds)?;
                }
            }
            Command::Input => {
                for _ in 0..node.count() {
                    self.read_cell(location)?;
                }
            }
            Command::Output => {
                for _ in 0..node.count() {
                    self.emit(self.tape.get(), Some(location))?;
                }
            }
            // Idempotent, so the count does not matter
            Command::ZeroCell => self.tape.set(0),
        }

        Ok(())
    }

    fn visit_loop(&mut self, node: &Loop) -> Result<(), RuntimeError> {
        self.current_location = Some(node.location);
        loop {
            let enters = self.tape.get() != 0;
            self.take_snapshot(Some(node.location), StepEvent::LoopGuard { enters })?;
            if !enters {
                break;
            }

            for child in &node.body {
                child.accept::<Result<(), RuntimeError>>(self)?;
            }
        }
        Ok(())
    }

    fn visit_program(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.tape.reset();
        self.current_location = None;
        self.finished = false;
        self.history = self
            .history_limit
            .map(|limit| SnapshotManager::new(self.tape.len(), limit));
        self.take_snapshot(None, StepEvent::Start)?;

        for node in &program.nodes {
            node.accept::<Result<(), RuntimeError>>(self)?;
        }

        self.emit(b'\n', None)?;
        self.output.flush().map_err(|e| io_error(e, None))?;

        self.current_location = None;
        self.take_snapshot(None, StepEvent::Halt)?;
        self.finished = true;
        Ok(())
    }
}
