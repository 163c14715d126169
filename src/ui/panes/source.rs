//! Source pane rendering with command coloring
//!
//! Displays the program being stepped through. Every command character is
//! colored by kind, the line holding the current node gets a highlighted
//! background, and the node's first character is drawn inverted.

use crate::parser::ast::{Command, SourceLocation};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn char_style(c: char) -> Style {
    match c {
        '[' | ']' => Style::default()
            .fg(DEFAULT_THEME.accent)
            .add_modifier(Modifier::BOLD),
        _ => match Command::from_char(c) {
            Some(Command::Increment | Command::Decrement | Command::ZeroCell) => {
                Style::default().fg(DEFAULT_THEME.cell_op)
            }
            Some(Command::ShiftLeft | Command::ShiftRight) => {
                Style::default().fg(DEFAULT_THEME.shift_op)
            }
            Some(Command::Input | Command::Output) => Style::default().fg(DEFAULT_THEME.io_op),
            // Comments and anything else
            None => Style::default().fg(DEFAULT_THEME.dim),
        },
    }
}

/// Color one source line; `marked_column` (1-based) is drawn inverted.
fn highlight_line(line: &str, marked_column: Option<usize>) -> Line<'static> {
    let spans: Vec<Span> = line
        .chars()
        .enumerate()
        .map(|(idx, c)| {
            let mut style = char_style(c);
            if marked_column == Some(idx + 1) {
                style = style
                    .fg(Color::Black)
                    .bg(DEFAULT_THEME.cursor_cell)
                    .add_modifier(Modifier::BOLD);
            }
            Span::styled(c.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to (None = center on first render)
    pub target_line_row: Option<usize>,
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current: Option<SourceLocation>,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = DEFAULT_THEME.border(is_focused);

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = current.map_or(0, |loc| loc.line);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current && is_error {
                Style::default()
                    .fg(DEFAULT_THEME.fault)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.dim)
            };

            let marked_column = current.filter(|_| is_current).map(|loc| loc.column);
            let mut content = highlight_line(line, marked_column);
            if is_current {
                for span in &mut content.spans {
                    if span.style.bg.is_none() {
                        span.style = span.style.bg(DEFAULT_THEME.line_bg);
                    }
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_column_is_inverted() {
        let line = highlight_line("+[-]", Some(2));
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[1].style.bg, Some(DEFAULT_THEME.cursor_cell));
        assert_eq!(line.spans[0].style.bg, None);
    }
}
