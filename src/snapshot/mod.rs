//! Recorded execution history for stepping backward and forward

use crate::interpreter::RuntimeError;
use crate::memory::Tape;
use crate::parser::ast::{Command, SourceLocation};
use rustc_hash::FxHashMap;
use std::mem;

/// Bytes written by Output operations during one execution.
///
/// Snapshots store only a prefix length into this log instead of a copy.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    bytes: Vec<u8>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { bytes: Vec::new() }
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lines of the first `len` bytes, decoded lossily.
    pub fn lines_up_to(&self, len: usize) -> Vec<String> {
        let prefix = &self.bytes[..len.min(self.bytes.len())];
        let text = String::from_utf8_lossy(prefix);
        let mut result: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }
}

/// What the interpreter was about to do when a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Fresh tape, nothing executed yet
    Start,
    /// About to run a command node
    Command { command: Command, count: usize },
    /// Evaluating a loop guard; `enters` is whether the body runs again
    LoopGuard { enters: bool },
    /// All top-level nodes executed
    Halt,
}

/// Tape state and position just before one step
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Non-zero cells only; absent cells are zero
    pub cells: FxHashMap<usize, u8>,
    pub cursor: usize,
    /// Prefix of the output log written so far
    pub output_len: usize,
    pub location: Option<SourceLocation>,
    pub event: StepEvent,
}

impl Snapshot {
    pub fn capture(
        tape: &Tape,
        output_len: usize,
        location: Option<SourceLocation>,
        event: StepEvent,
    ) -> Self {
        Snapshot {
            cells: tape.non_zero_cells().collect(),
            cursor: tape.cursor(),
            output_len,
            location,
            event,
        }
    }

    pub fn cell(&self, index: usize) -> u8 {
        self.cells.get(&index).copied().unwrap_or(0)
    }

    /// Approximate heap and inline footprint, used for the budget
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: one key, one value and a control byte per entry
        let per_cell = mem::size_of::<usize>() + mem::size_of::<u8>() + 1;
        mem::size_of::<Snapshot>() + self.cells.len() * per_cell
    }
}

/// Ordered snapshots plus the output log they index into
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    output: OutputLog,
    tape_len: usize,
    max_memory: usize,
    current_memory: usize,
    position: usize,
}

impl SnapshotManager {
    pub fn new(tape_len: usize, max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            output: OutputLog::new(),
            tape_len,
            max_memory,
            current_memory: 0,
            position: 0,
        }
    }

    /// Append `snapshot`, failing once the byte budget would be exceeded.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), RuntimeError> {
        let needed = self.current_memory + snapshot.estimated_size();
        if needed > self.max_memory {
            return Err(RuntimeError::SnapshotLimitExceeded {
                current: needed,
                limit: self.max_memory,
            });
        }
        self.current_memory = needed;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Append an output byte, charging it against the same budget as snapshots.
    pub fn record_output(&mut self, byte: u8) -> Result<(), RuntimeError> {
        let needed = self.current_memory + 1;
        if needed > self.max_memory {
            return Err(RuntimeError::SnapshotLimitExceeded {
                current: needed,
                limit: self.max_memory,
            });
        }
        self.current_memory = needed;
        self.output.push(byte);
        Ok(())
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Snapshot at the navigation position
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn tape_len(&self) -> usize {
        self.tape_len
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Bytes charged against the budget so far
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }

    pub fn step_forward(&mut self) -> Result<(), String> {
        if self.position + 1 >= self.snapshots.len() {
            return Err("No more snapshots available (execution finished)".to_string());
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), String> {
        if self.position == 0 {
            return Err("Already at the beginning of execution".to_string());
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) -> Result<(), String> {
        if self.snapshots.is_empty() {
            return Err("No snapshots available".to_string());
        }
        self.position = 0;
        Ok(())
    }

    pub fn jump_to_end(&mut self) -> Result<(), String> {
        if self.snapshots.is_empty() {
            return Err("No snapshots available".to_string());
        }
        self.position = self.snapshots.len() - 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_of(tape: &Tape, event: StepEvent) -> Snapshot {
        Snapshot::capture(tape, 0, None, event)
    }

    #[test]
    fn test_capture_is_sparse() {
        let mut tape = Tape::new(100);
        tape.set(3);
        tape.move_right().unwrap();
        let snapshot = snapshot_of(&tape, StepEvent::Start);

        assert_eq!(snapshot.cells.len(), 1);
        assert_eq!(snapshot.cell(0), 3);
        assert_eq!(snapshot.cell(1), 0);
        assert_eq!(snapshot.cursor, 1);
    }

    #[test]
    fn test_memory_limit() {
        let tape = Tape::new(10);
        let size = snapshot_of(&tape, StepEvent::Start).estimated_size();
        let mut manager = SnapshotManager::new(10, size * 2);

        assert!(manager.push(snapshot_of(&tape, StepEvent::Start)).is_ok());
        assert!(manager.push(snapshot_of(&tape, StepEvent::Halt)).is_ok());
        assert!(manager.push(snapshot_of(&tape, StepEvent::Halt)).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), size * 2);
    }

    #[test]
    fn test_navigation() {
        let tape = Tape::new(10);
        let mut manager = SnapshotManager::new(10, usize::MAX);
        assert!(manager.rewind_to_start().is_err());

        for _ in 0..3 {
            manager.push(snapshot_of(&tape, StepEvent::Start)).unwrap();
        }

        assert!(manager.step_backward().is_err());
        manager.step_forward().unwrap();
        manager.step_forward().unwrap();
        assert_eq!(manager.position(), 2);
        assert!(manager.step_forward().is_err());

        manager.rewind_to_start().unwrap();
        assert_eq!(manager.position(), 0);
        manager.jump_to_end().unwrap();
        assert_eq!(manager.position(), 2);
        manager.step_backward().unwrap();
        assert_eq!(manager.position(), 1);
    }

    #[test]
    fn test_output_log_lines() {
        let mut log = OutputLog::new();
        for &b in b"hi\nthere\n" {
            log.push(b);
        }
        assert_eq!(log.lines_up_to(log.len()), vec!["hi", "there"]);
        assert_eq!(log.lines_up_to(4), vec!["hi", "t"]);
        assert!(log.lines_up_to(0).is_empty());
    }

    #[test]
    fn test_output_counts_against_limit() {
        let tape = Tape::new(10);
        let size = snapshot_of(&tape, StepEvent::Start).estimated_size();
        let mut manager = SnapshotManager::new(10, size + 2);
        manager.push(snapshot_of(&tape, StepEvent::Start)).unwrap();

        manager.record_output(b'a').unwrap();
        manager.record_output(b'b').unwrap();
        assert_eq!(manager.memory_usage(), size + 2);
        assert!(matches!(
            manager.record_output(b'c'),
            Err(RuntimeError::SnapshotLimitExceeded { .. })
        ));
        assert_eq!(manager.output().as_bytes(), b"ab");
        assert!(manager.push(snapshot_of(&tape, StepEvent::Halt)).is_err());
    }
}
