//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::{ApiError, Joke, JokeSource};
use crate::core::state::AppState;

/// A joke source that answers from canned results and records each call.
pub struct ScriptedSource {
    categories: Result<Vec<String>, ApiError>,
    joke: Result<Joke, ApiError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub fn with_categories(categories: &[&str]) -> Self {
        Self {
            categories: Ok(themes(categories)),
            joke: Ok(Joke::new("Chuck Norris can unit test entire applications with a single assert.")),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with `error`.
    pub fn failing(error: ApiError) -> Self {
        Self {
            categories: Err(error.clone()),
            joke: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn joke(mut self, value: &str) -> Self {
        self.joke = Ok(Joke::new(value));
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl JokeSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.calls.lock().unwrap().push("categories".to_string());
        self.categories.clone()
    }

    async fn random_joke(&self, category: &str) -> Result<Joke, ApiError> {
        self.calls.lock().unwrap().push(format!("random_joke:{category}"));
        self.joke.clone()
    }
}

pub fn themes(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// A state in the middle of a countdown with a joke still on screen.
pub fn test_state() -> AppState {
    AppState {
        joke: Some("old joke".to_string()),
        themes: themes(&["dev", "food", "dev"]),
        timer: 3,
        loading: false,
        error: None,
    }
}
