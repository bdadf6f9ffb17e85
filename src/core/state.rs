//! # Application State
//!
//! Core business state for Quip. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! AppState
//! ├── joke: Option<String>     // current joke text
//! ├── themes: Vec<String>      // 0 or 3 sampled categories
//! ├── timer: u32               // countdown seconds remaining
//! ├── loading: bool            // waiting for the categories fetch
//! └── error: Option<String>    // last fetch failure
//! ```
//!
//! State changes only happen through `reduce(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

/// Number of categories offered per joke request.
pub const THEME_COUNT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub joke: Option<String>,
    pub themes: Vec<String>,
    pub timer: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the user can pick a category.
    pub fn has_themes(&self) -> bool {
        !self.themes.is_empty()
    }
}
