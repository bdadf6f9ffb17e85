//! # Actions
//!
//! Everything that can happen in Quip becomes an `Action`.
//! User presses the joke button? That's `Action::RequestJoke`.
//! The API answers? That's `Action::SetThemes(..)` or `Action::SetJoke(..)`.
//!
//! The `reduce()` function takes the current state and an action,
//! then returns the new state. No side effects here. I/O happens in the epics.
//!
//! ```text
//! State + Action  →  reduce()  →  New State
//! ```
//!
//! This makes everything testable: `assert_eq!(reduce(&state, &action), expected)`.
//! And debuggable: every dispatched action is logged.

use crate::core::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The user wants a new joke. Only the epics react to this.
    RequestJoke,
    SetLoading(bool),
    /// `None` clears the current joke.
    SetJoke(Option<String>),
    SetThemes(Vec<String>),
    /// The user picked a category. Only the epics react to this.
    ApplyTheme(String),
    SetTimer(u32),
    /// A fetch failed. Carries a message for the user.
    RequestFailed(String),
}

impl Action {
    /// Short name for logging, without the payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::RequestJoke => "RequestJoke",
            Action::SetLoading(_) => "SetLoading",
            Action::SetJoke(_) => "SetJoke",
            Action::SetThemes(_) => "SetThemes",
            Action::ApplyTheme(_) => "ApplyTheme",
            Action::SetTimer(_) => "SetTimer",
            Action::RequestFailed(_) => "RequestFailed",
        }
    }
}

/// Folds an action into a new state. Pure: the input state is never touched.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::SetJoke(joke) => AppState {
            joke: joke.clone(),
            error: None,
            ..state.clone()
        },
        Action::SetThemes(themes) => AppState {
            themes: themes.clone(),
            ..state.clone()
        },
        Action::SetTimer(timer) => AppState {
            timer: *timer,
            ..state.clone()
        },
        Action::SetLoading(loading) => AppState {
            loading: *loading,
            error: if *loading { None } else { state.error.clone() },
            ..state.clone()
        },
        Action::RequestFailed(message) => AppState {
            loading: false,
            error: Some(message.clone()),
            ..state.clone()
        },
        Action::RequestJoke | Action::ApplyTheme(_) => state.clone(),
    }
}
