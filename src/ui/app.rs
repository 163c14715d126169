//! Main TUI application state and logic

use crate::snapshot::{Snapshot, SnapshotManager, StepEvent};
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between steps while autoplaying
const PLAY_INTERVAL: Duration = Duration::from_millis(150);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> tape)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tape,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Output,
        }
    }
}

/// The main application state
pub struct App {
    /// Recorded execution history being browsed
    pub history: SnapshotManager,

    /// The source code that was executed
    pub source_code: String,

    /// Shown in the source pane title
    pub file_name: String,

    /// Runtime error that ended execution, if any
    pub error: Option<String>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    /// First visible tape cell; `None` follows the cursor
    pub tape_start: Option<usize>,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    /// Create a new app over `history`
    pub fn new(
        history: SnapshotManager,
        source_code: String,
        file_name: String,
        error: Option<String>,
    ) -> Self {
        let status_message = match &error {
            Some(message) => format!("Stopped early: {}", message),
            None => String::from("Ready!"),
        };
        App {
            history,
            source_code,
            file_name,
            error,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tape_start: None,
            output_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.history.step_forward().is_ok() {
                    self.after_step();
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(30))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let Some(snapshot) = self.history.current().cloned() else {
            return;
        };
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: Source (top) | Output (bottom); right column: Tape
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let at_failure = self.error.is_some() && self.is_at_end();

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            snapshot.location,
            at_failure,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_terminal_pane(
            frame,
            left_rows[1],
            self.history.output(),
            snapshot.output_len,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_tape_pane(
            frame,
            columns[1],
            &snapshot,
            self.history.tape_len(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_start,
        );

        let message = if self.status_message.is_empty() {
            describe(&snapshot)
        } else {
            self.status_message.clone()
        };
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &message,
            self.history.position(),
            self.history.len(),
            at_failure,
            self.is_playing,
        );
    }

    fn is_at_end(&self) -> bool {
        self.history.position() + 1 >= self.history.len()
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.history.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.after_step();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                match self.history.step_backward() {
                    Ok(()) => {
                        self.after_step();
                        self.status_message.clear();
                    }
                    Err(message) => self.status_message = format!("Cannot step backward: {}", message),
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                match self.history.step_forward() {
                    Ok(()) => {
                        self.after_step();
                        self.status_message.clear();
                    }
                    Err(message) => self.status_message = format!("Cannot step forward: {}", message),
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => {
                    let start = self.tape_start.unwrap_or_else(|| self.current_cursor());
                    self.tape_start = Some(start.saturating_sub(1));
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => {
                    let start = self.tape_start.unwrap_or_else(|| self.current_cursor());
                    self.tape_start = Some(start.saturating_add(1));
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(PLAY_INTERVAL)
                        .unwrap_or_else(Instant::now);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                if self.history.jump_to_end().is_ok() {
                    self.after_step();
                }
                self.status_message = match &self.error {
                    Some(message) => format!("Stopped early: {}", message),
                    None => "Jumped to end".to_string(),
                };
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                if self.history.rewind_to_start().is_ok() {
                    self.after_step();
                }
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn current_cursor(&self) -> usize {
        self.history.current().map_or(0, |s| s.cursor)
    }

    /// Follow the cursor and the newest output again after moving in history
    fn after_step(&mut self) {
        self.tape_start = None;
        self.output_scroll = usize::MAX;
    }
}

/// One-line description of what a snapshot is about to do
fn describe(snapshot: &Snapshot) -> String {
    let at = snapshot
        .location
        .map(|loc| format!(" at {}:{}", loc.line, loc.column))
        .unwrap_or_default();
    match snapshot.event {
        StepEvent::Start => "Program start".to_string(),
        StepEvent::Command { command, count } => {
            format!("Next: {}{}{}", count, command.marker(), at)
        }
        StepEvent::LoopGuard { enters: true } => format!("Loop guard non-zero, entering body{}", at),
        StepEvent::LoopGuard { enters: false } => format!("Loop guard zero, leaving loop{}", at),
        StepEvent::Halt => "Halted".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;
    use crate::parser::parser::parse;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app_for(source: &str) -> App {
        let program = parse(source).unwrap();
        let mut interpreter =
            Interpreter::new(io::empty(), Vec::new()).with_history(usize::MAX);
        interpreter.run(&program).unwrap();
        let history = interpreter.take_history().unwrap();
        App::new(history, source.to_string(), "test.bf".to_string(), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut pane = FocusedPane::Source;
        for _ in 0..3 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.next().prev(), FocusedPane::Source);
    }

    #[test]
    fn test_keys_move_through_history() {
        let mut app = app_for("++>+.");
        assert_eq!(app.history.position(), 0);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.history.position(), 1);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.history.position(), 4);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.history.position(), 3);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.history.position(), app.history.len() - 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.history.position(), 0);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_renders_on_test_backend() {
        let mut app = app_for("+++[>++<-]>.");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        press(&mut app, KeyCode::Enter);
        terminal.draw(|f| app.render(f)).unwrap();
        assert_eq!(app.history.current().unwrap().event, StepEvent::Halt);
    }
}
