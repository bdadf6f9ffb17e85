use crate::core::state::AppState;
use crate::tui::component::Component;
use crate::tui::components::{JokeButton, JokePanel, ThemeSelector, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const KEY_HINTS: &str = " Enter/j joke  Tab focus  ↑↓ move  1-3 pick  q quit ";

pub fn draw_ui(frame: &mut Frame, state: &AppState, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let selector_height = if tui.selector.is_empty() {
        0
    } else {
        tui.selector.row_count() as u16 + 2
    };
    let countdown_height = if state.timer > 0 { 1 } else { 0 };

    let layout = Layout::vertical([
        Length(1),
        Length(3),
        Length(selector_height),
        Length(countdown_height),
        Min(0),
        Length(1),
    ]);
    let [title_area, button_area, selector_area, countdown_area, main_area, footer_area] =
        layout.areas(frame.area());

    TitleBar::new(tui.host.clone(), status_message(state).to_string()).render(frame, title_area);

    JokeButton::new(tui.focus == Focus::Button).render(frame, button_area);

    if selector_height > 0 {
        ThemeSelector::new(&mut tui.selector, tui.focus == Focus::Selector)
            .render(frame, selector_area);
    }

    if state.timer > 0 {
        draw_countdown(frame, countdown_area, state.timer);
    }

    let mut panel = JokePanel::new(
        state.joke.as_deref(),
        state.loading,
        state.error.as_deref(),
        spinner_frame,
    );
    let panel_height = panel.required_height(main_area.width).min(main_area.height);
    panel.render(frame, Rect { height: panel_height, ..main_area });

    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

fn draw_countdown(frame: &mut Frame, area: Rect, timer: u32) {
    let line = Line::from(vec![
        Span::raw(" Time left: "),
        Span::styled(
            timer.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn status_message(state: &AppState) -> &'static str {
    if state.loading {
        "Loading..."
    } else if state.error.is_some() {
        "Request failed"
    } else if state.has_themes() {
        "Pick a category"
    } else {
        ""
    }
}
