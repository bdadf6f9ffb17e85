pub mod chuck_norris;
pub mod source;
pub mod types;

pub use chuck_norris::ChuckNorrisClient;
pub use source::{ApiError, JokeSource};
pub use types::Joke;
