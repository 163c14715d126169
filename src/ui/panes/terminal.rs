//! Output pane: bytes written so far, one line per `\n`

use crate::snapshot::OutputLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Clamp a requested first row so the last page stays full.
///
/// `usize::MAX` is used by the app to mean "follow the newest line".
pub fn clamp_scroll(requested: usize, total_lines: usize, visible: usize) -> usize {
    requested.min(total_lines.saturating_sub(visible))
}

/// Render the first `output_len` bytes of `output`
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    output: &OutputLog,
    output_len: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Output ({} bytes) ", output_len))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    let lines = output.lines_up_to(output_len);
    if lines.is_empty() {
        *scroll_offset = 0;
        let placeholder = Paragraph::new("(nothing written yet)")
            .style(Style::default().fg(DEFAULT_THEME.dim))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let visible = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = clamp_scroll(*scroll_offset, lines.len(), visible);

    let rows: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(Line::from)
        .collect();

    let paragraph = Paragraph::new(rows)
        .style(Style::default().fg(DEFAULT_THEME.text))
        .block(block);
    frame.render_widget(paragraph, area);
}
