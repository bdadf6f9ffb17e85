//! RequestJoke: clear the stage, fetch categories, offer three of them.

use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::api::{ApiError, JokeSource};
use crate::core::action::Action;
use crate::core::state::THEME_COUNT;

/// Emitted before the network call resolves.
pub fn immediate() -> Vec<Action> {
    vec![Action::SetJoke(None), Action::SetLoading(true)]
}

/// Picks [`THEME_COUNT`] categories uniformly, with replacement.
/// Returns `None` for an empty list.
pub fn sample_themes<R: Rng + ?Sized>(categories: &[String], rng: &mut R) -> Option<Vec<String>> {
    (0..THEME_COUNT)
        .map(|_| categories.choose(&mut *rng).cloned())
        .collect()
}

/// A SetThemes leaving this pipeline drags the loading flag and the
/// countdown reset along with it.
fn with_follow_ups(action: Action, countdown_secs: u32) -> Vec<Action> {
    match action {
        Action::SetThemes(_) => vec![
            action,
            Action::SetLoading(false),
            Action::SetTimer(countdown_secs),
        ],
        other => vec![other],
    }
}

pub async fn fetch_themes(
    source: Arc<dyn JokeSource>,
    sampler: Arc<Mutex<StdRng>>,
    countdown_secs: u32,
) -> Vec<Action> {
    info!("Fetching categories from {}", source.name());
    let sampled = source.categories().await.and_then(|categories| {
        let mut rng = sampler.lock().unwrap_or_else(PoisonError::into_inner);
        sample_themes(&categories, &mut *rng).ok_or(ApiError::Empty)
    });

    match sampled {
        Ok(themes) => {
            info!("Offering themes: {:?}", themes);
            with_follow_ups(Action::SetThemes(themes), countdown_secs)
        }
        Err(e) => {
            warn!("Category fetch failed: {}", e);
            vec![Action::RequestFailed(format!("Couldn't load categories: {e}"))]
        }
    }
}
