use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;

pub const BUTTON_LABEL: &str = "Get a joke";

/// The one button. Highlighted when it has focus.
pub struct JokeButton {
    pub focused: bool,
}

impl JokeButton {
    pub fn new(focused: bool) -> Self {
        Self { focused }
    }
}

impl Component for JokeButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (style, border_style) = if self.focused {
            (
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Cyan),
            )
        } else {
            (
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::DarkGray),
            )
        };

        // Button hugs its label instead of spanning the whole row
        let width = (BUTTON_LABEL.len() as u16 + 4).min(area.width);
        let button_area = Rect { width, ..area };

        let button = Paragraph::new(BUTTON_LABEL)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(border_style));
        frame.render_widget(button, button_area);
    }
}
