//! # Joke Panel
//!
//! Main area. Shows, in priority order: the error, the loading spinner,
//! the joke, or a hint when there is nothing yet.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct JokePanel<'a> {
    pub joke: Option<&'a str>,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub spinner_frame: usize,
}

impl<'a> JokePanel<'a> {
    pub fn new(
        joke: Option<&'a str>,
        loading: bool,
        error: Option<&'a str>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            joke,
            loading,
            error,
            spinner_frame,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                error,
                Style::default().fg(Color::Red),
            )));
        }
        if self.loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            lines.push(Line::from(Span::styled(
                format!("{spinner} Loading..."),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(joke) = self.joke {
            lines.push(Line::from(Span::styled(
                joke,
                Style::default().fg(Color::Green),
            )));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "Press Enter for a joke.",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }

    /// Height the panel needs at `width`, borders included.
    pub fn required_height(&self, width: u16) -> u16 {
        let paragraph = Paragraph::new(self.lines()).wrap(Wrap { trim: true });
        let lines = paragraph.line_count(width.saturating_sub(4));
        u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
    }
}

impl Component for JokePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(Block::bordered().padding(Padding::horizontal(1)))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
