//! # TitleBar Component
//!
//! Top status bar. Purely presentational: it receives all data as props
//! and has no internal state.
//!
//! The title text changes based on state:
//!
//! 1. **Status message**: `"Quip (api: api.chucknorris.io) | Loading..."`
//! 2. **Default**: `"Quip (api: api.chucknorris.io)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Host the jokes come from (e.g., "api.chucknorris.io")
    pub host: String,
    /// Transient status (e.g., "Loading...", "Pick a category")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(host: String, status_message: String) -> Self {
        Self {
            host,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Quip (api: {})", self.host)
        } else {
            format!("Quip (api: {}) | {}", self.host, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}
