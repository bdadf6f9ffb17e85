//! # Theme Selector Component
//!
//! Category picker shown while themes are on offer. The first row is a
//! blank entry, so nothing is picked until the user moves onto a theme.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ThemeSelectorState` lives in `TuiState`
//! - `ThemeSelector` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const BLANK_ROW: &str = "(pick a category)";

/// Persistent state for the selector. Row 0 is the blank entry,
/// row `n` is `themes[n - 1]`.
#[derive(Default)]
pub struct ThemeSelectorState {
    pub themes: Vec<String>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ThemeSelectorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the offered themes. Selection goes back to the blank row
    /// whenever the list actually changes. Returns true in that case.
    pub fn set_themes(&mut self, themes: &[String]) -> bool {
        if self.themes.as_slice() == themes {
            return false;
        }
        self.themes = themes.to_vec();
        self.selected = 0;
        self.list_state
            .select(if themes.is_empty() { None } else { Some(0) });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Rows including the blank entry.
    pub fn row_count(&self) -> usize {
        if self.themes.is_empty() {
            0
        } else {
            self.themes.len() + 1
        }
    }

    fn select(&mut self, row: usize) {
        self.selected = row;
        self.list_state.select(Some(row));
    }
}

/// Events emitted by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    Apply(String),
}

impl EventHandler for ThemeSelectorState {
    type Event = SelectorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SelectorEvent> {
        if self.themes.is_empty() {
            return None;
        }
        match event {
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select((self.selected + 1).min(self.row_count() - 1));
                None
            }
            // Blank row applies nothing
            TuiEvent::Submit => self
                .selected
                .checked_sub(1)
                .and_then(|i| self.themes.get(i))
                .map(|theme| SelectorEvent::Apply(theme.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the selector.
pub struct ThemeSelector<'a> {
    state: &'a mut ThemeSelectorState,
    focused: bool,
}

impl<'a> ThemeSelector<'a> {
    pub fn new(state: &'a mut ThemeSelectorState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Component for ThemeSelector<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.state.is_empty() {
            return;
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_style(border_style)
            .title(" Category ")
            .title_alignment(Alignment::Left);

        let mut items = vec![ListItem::new(Line::from(Span::styled(
            BLANK_ROW,
            Style::default().fg(Color::DarkGray),
        )))];
        items.extend(self.state.themes.iter().enumerate().map(|(i, theme)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(theme.clone()),
            ]))
        }));

        let highlight = if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
