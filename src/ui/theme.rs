//! Color palette shared by every pane

use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub text: Color,
    pub accent: Color,
    pub highlight: Color,
    pub dim: Color,
    pub ok: Color,
    pub fault: Color,
    /// `+ - 0`
    pub cell_op: Color,
    /// `< >`
    pub shift_op: Color,
    /// `, .`
    pub io_op: Color,
    pub focus_border: Color,
    pub idle_border: Color,
    pub line_bg: Color,
    /// Background of the cell under the cursor and the current source char
    pub cursor_cell: Color,
}

impl Theme {
    /// Border style for a pane, bold while it has focus
    pub fn border(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.focus_border)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.idle_border)
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    highlight: Color::Rgb(250, 179, 135),
    dim: Color::Rgb(108, 112, 134),
    ok: Color::Rgb(166, 227, 161),
    fault: Color::Rgb(243, 139, 168),
    cell_op: Color::Rgb(250, 179, 135),
    shift_op: Color::Rgb(137, 180, 250),
    io_op: Color::Rgb(148, 226, 213),
    focus_border: Color::Rgb(249, 226, 175),
    idle_border: Color::Rgb(108, 112, 134),
    line_bg: Color::Rgb(50, 50, 70),
    cursor_cell: Color::Rgb(245, 194, 231),
};
