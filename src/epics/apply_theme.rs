//! ApplyTheme: fetch one random joke from the chosen category.

use std::sync::Arc;

use log::{info, warn};

use crate::api::JokeSource;
use crate::core::action::Action;

pub async fn fetch_joke(source: Arc<dyn JokeSource>, category: String) -> Vec<Action> {
    info!("Fetching a '{}' joke from {}", category, source.name());
    match source.random_joke(&category).await {
        Ok(joke) => vec![Action::SetJoke(Some(joke.value))],
        Err(e) => {
            warn!("Joke fetch for '{}' failed: {}", category, e);
            vec![Action::RequestFailed(format!(
                "Couldn't load a {category} joke: {e}"
            ))]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::test_support::ScriptedSource;

    #[tokio::test]
    async fn test_fetch_joke_success() {
        let source = Arc::new(ScriptedSource::with_categories(&["dev"]).joke("joke text"));
        let actions = fetch_joke(source, "dev".into()).await;
        assert_eq!(actions, vec![Action::SetJoke(Some("joke text".into()))]);
    }

    #[tokio::test]
    async fn test_fetch_joke_failure() {
        let source = Arc::new(ScriptedSource::failing(ApiError::Api {
            status: 404,
            message: "no jokes for category".into(),
        }));
        let actions = fetch_joke(source, "nope".into()).await;
        match actions.as_slice() {
            [Action::RequestFailed(msg)] => {
                assert!(msg.starts_with("Couldn't load a nope joke"));
                assert!(msg.contains("404"));
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }
}
