//! Tape pane rendering
//!
//! One row per cell: index, decimal value, hex value and printable character.
//! By default the window follows the cursor; the app can pin it to a start
//! cell while the user scrolls.

use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// First cell shown when following a cursor at `cursor`
pub fn follow_start(cursor: usize, tape_len: usize, visible: usize) -> usize {
    let start = cursor.saturating_sub(visible / 2);
    start.min(tape_len.saturating_sub(visible))
}

fn printable(value: u8) -> String {
    if value.is_ascii_graphic() || value == b' ' {
        format!("'{}'", value as char)
    } else {
        String::from(" · ")
    }
}

/// Render the tape pane
///
/// `pinned_start` is `None` to follow the cursor. The start actually used is
/// written back so scrolling continues from what is on screen.
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    tape_len: usize,
    is_focused: bool,
    pinned_start: &mut Option<usize>,
) {
    let border_style = DEFAULT_THEME.border(is_focused);

    let block = Block::default()
        .title(format!(" Tape (cursor @ {}) ", snapshot.cursor))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_start = tape_len.saturating_sub(visible_height);
    let start = match *pinned_start {
        Some(start) => {
            let start = start.min(max_start);
            *pinned_start = Some(start);
            start
        }
        None => follow_start(snapshot.cursor, tape_len, visible_height),
    };

    let rows: Vec<Line> = (start..tape_len.min(start + visible_height))
        .map(|index| {
            let value = snapshot.cell(index);
            let is_cursor = index == snapshot.cursor;

            let marker = if is_cursor { "▶" } else { " " };
            let text = format!(
                "{} {:>5} │ {:>3}  0x{:02x}  {}",
                marker,
                index,
                value,
                value,
                printable(value)
            );

            let style = if is_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(DEFAULT_THEME.cursor_cell)
                    .add_modifier(Modifier::BOLD)
            } else if value != 0 {
                Style::default().fg(DEFAULT_THEME.text)
            } else {
                Style::default().fg(DEFAULT_THEME.dim)
            };

            Line::from(Span::styled(text, style))
        })
        .collect();

    let paragraph = Paragraph::new(rows).block(block);
    frame.render_widget(paragraph, area);
}
