use serde::{Deserialize, Serialize};

/// Body of `GET /jokes/random`. Only the joke text is kept; the other
/// fields (`id`, `url`, `icon_url`, timestamps) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub value: String,
}

impl Joke {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
