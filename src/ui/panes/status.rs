//! Status bar: step counter, message, key hints and a position badge

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEY_HINTS: &[(&str, &str)] = &[
    ("←/→", "step"),
    ("1-9", "jump"),
    ("⎵", "play"),
    ("↵/⌫", "end/start"),
    ("q", "quit"),
];

/// Where the viewer sits in the recorded history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Badge {
    Playing,
    Failed,
    End,
    Start,
}

impl Badge {
    fn pick(step: usize, total: usize, is_error: bool, is_playing: bool) -> Option<Self> {
        let at_end = step + 1 >= total;
        if is_playing {
            Some(Badge::Playing)
        } else if at_end && is_error {
            Some(Badge::Failed)
        } else if at_end {
            Some(Badge::End)
        } else if step == 0 {
            Some(Badge::Start)
        } else {
            None
        }
    }

    fn label(self) -> &'static str {
        match self {
            Badge::Playing => " ▶ PLAYING ",
            Badge::Failed => " ERROR ",
            Badge::End => " HALT ",
            Badge::Start => " START ",
        }
    }

    fn color(self) -> Color {
        match self {
            Badge::Playing => DEFAULT_THEME.highlight,
            Badge::Failed => DEFAULT_THEME.fault,
            Badge::End => DEFAULT_THEME.accent,
            Badge::Start => DEFAULT_THEME.ok,
        }
    }
}

/// Render the status bar
///
/// `is_error` marks a history that ended in a runtime error.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    current_step: usize,
    total_steps: usize,
    is_error: bool,
    is_playing: bool,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let bar = Style::default().bg(DEFAULT_THEME.line_bg);

    let counter_bg = if is_error {
        DEFAULT_THEME.fault
    } else {
        DEFAULT_THEME.accent
    };
    let message_fg = if is_error {
        DEFAULT_THEME.fault
    } else {
        DEFAULT_THEME.text
    };
    let left = Line::from(vec![
        Span::styled(
            format!(" {}/{} ", current_step + 1, total_steps),
            Style::default()
                .bg(counter_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", message), bar.fg(message_fg)),
    ]);
    frame.render_widget(Paragraph::new(left).style(bar), halves[0]);

    let key = Style::default().bg(DEFAULT_THEME.dim).fg(Color::Black);
    let mut right: Vec<Span> = Vec::new();
    for (keys, action) in KEY_HINTS {
        right.push(Span::styled(format!(" {} ", keys), key));
        right.push(Span::styled(format!(" {} ", action), bar.fg(DEFAULT_THEME.text)));
    }
    if let Some(badge) = Badge::pick(current_step, total_steps, is_error, is_playing) {
        right.push(Span::styled(
            badge.label(),
            Style::default()
                .bg(badge.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let paragraph = Paragraph::new(Line::from(right))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(paragraph, halves[1]);
}
