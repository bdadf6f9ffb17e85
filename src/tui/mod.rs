//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The store notifies a subscriber that flips a dirty flag; the loop only
//! draws when that flag or a terminal event says something changed.
//! While loading, the spinner forces a redraw every ~80ms. Otherwise the
//! loop sleeps up to 100ms in `poll`, which also bounds how late a
//! countdown tick shows up on screen.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::ChuckNorrisClient;
use crate::core::action::{Action, reduce};
use crate::core::config::ResolvedConfig;
use crate::core::state::AppState;
use crate::core::store::Store;
use crate::dispatch::Dispatcher;
use crate::epics::EpicSettings;
use crate::tui::component::EventHandler;
use crate::tui::components::{SelectorEvent, ThemeSelectorState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which control receives Enter and the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Button,
    Selector,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub host: String,
    pub focus: Focus,
    pub selector: ThemeSelectorState,
}

/// What the loop should do with a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Dispatch(Action),
    Quit,
}

impl TuiState {
    pub fn new(host: String) -> Self {
        Self {
            host,
            focus: Focus::Button,
            selector: ThemeSelectorState::new(),
        }
    }

    /// Brings presentation state in line with the latest `AppState`.
    pub fn sync(&mut self, state: &AppState) {
        let changed = self.selector.set_themes(&state.themes);
        if self.selector.is_empty() {
            self.focus = Focus::Button;
        } else if changed {
            // Fresh choices: jump straight into the list
            self.focus = Focus::Selector;
        }
    }

    /// Interprets one terminal event. Returns `None` when the event only
    /// changed presentation state.
    pub fn route_event(&mut self, event: &TuiEvent) -> Option<Control> {
        match event {
            TuiEvent::Quit | TuiEvent::ForceQuit => return Some(Control::Quit),
            TuiEvent::Resize => return None,
            TuiEvent::InputChar('j') => return Some(Control::Dispatch(Action::RequestJoke)),
            TuiEvent::InputChar(c @ '1'..='9') => {
                let index = (*c as usize) - ('1' as usize);
                return self
                    .selector
                    .themes
                    .get(index)
                    .map(|theme| Control::Dispatch(Action::ApplyTheme(theme.clone())));
            }
            TuiEvent::FocusNext => {
                self.focus = match self.focus {
                    Focus::Button if !self.selector.is_empty() => Focus::Selector,
                    _ => Focus::Button,
                };
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Button => match event {
                TuiEvent::Submit => Some(Control::Dispatch(Action::RequestJoke)),
                TuiEvent::CursorDown if !self.selector.is_empty() => {
                    self.focus = Focus::Selector;
                    None
                }
                _ => None,
            },
            Focus::Selector => {
                if matches!(event, TuiEvent::CursorUp) && self.selector.selected == 0 {
                    self.focus = Focus::Button;
                    return None;
                }
                self.selector.handle_event(event).map(|selector_event| match selector_event {
                    SelectorEvent::Apply(theme) => Control::Dispatch(Action::ApplyTheme(theme)),
                })
            }
        }
    }
}

/// Host part of the base URL, for the title bar.
fn display_host(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = Arc::new(ChuckNorrisClient::new(
        Some(config.base_url.clone()),
        Some(config.request_timeout),
    ));
    let rng = match config.seed {
        Some(seed) => {
            info!("Sampling categories with seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut dispatcher = Dispatcher::new(
        Store::new(AppState::new(), reduce),
        source,
        rng,
        EpicSettings::from(&config),
    );

    // Store → redraw flag
    let dirty = Arc::new(AtomicBool::new(true));
    let flag = dirty.clone();
    dispatcher
        .store_mut()
        .subscribe(move |_| flag.store(true, Ordering::Relaxed));

    let mut tui = TuiState::new(display_host(&config.base_url));
    let mut terminal = ratatui::init();
    info!("Terminal initialized");

    let start_time = Instant::now();

    loop {
        // Background epics report through the channel
        dispatcher.drain();

        let state = dispatcher.state().clone();
        tui.sync(&state);

        if state.loading || dirty.swap(false, Ordering::Relaxed) {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &state, &mut tui, spinner_frame)) {
                ratatui::restore();
                return Err(e);
            }
        }

        let timeout = if state.loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(100)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            dirty.store(true, Ordering::Relaxed);
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match tui.route_event(&event) {
                Some(Control::Quit) => {
                    should_quit = true;
                    break;
                }
                Some(Control::Dispatch(action)) => {
                    info!("User dispatched {}", action.kind());
                    dispatcher.dispatch(action);
                }
                None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    if dispatcher.countdown_active() {
        warn!("Exiting with a countdown still running");
    }
    ratatui::restore();
    info!("Terminal restored, exiting");
    Ok(())
}
