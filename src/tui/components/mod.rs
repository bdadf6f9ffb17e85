//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: top line with API host and status
//! - `JokeButton`: the "Get a joke" button
//! - `JokePanel`: joke text, loading spinner or error
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ThemeSelector`: category list with its own highlight, emits
//!   `SelectorEvent::Apply` when the user picks one
//!
//! Components receive external data as props, never by reaching into
//! `AppState` themselves:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! JokePanel::new(state.joke.as_deref(), state.loading, state.error.as_deref(), frame_no)
//!     .render(frame, area);
//! ```

mod joke_button;
mod joke_panel;
mod theme_selector;
mod title_bar;

pub use joke_button::JokeButton;
pub use joke_panel::JokePanel;
pub use theme_selector::{SelectorEvent, ThemeSelector, ThemeSelectorState};
pub use title_bar::TitleBar;
