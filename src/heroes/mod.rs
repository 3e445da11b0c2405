//! Hero records, the in-memory roster and the search backend built on it.

mod error;
mod hero;
mod matching;
mod service;
mod store;

pub use error::HeroError;
pub use hero::{Hero, mock_heroes, parse_roster};
pub use matching::MatchMode;
pub use service::HeroSearchService;
pub use store::HeroStore;
