use thiserror::Error;

/// Failures raised by the hero store and the search service built on it.
#[derive(Debug, Error)]
pub enum HeroError {
	/// No hero carries the requested id.
	#[error("hero id={id} not found")]
	NotFound { id: u32 },

	/// Hero names must contain at least one non-whitespace character.
	#[error("hero name must not be blank")]
	InvalidName,

	/// The request was superseded before it finished.
	#[error("search cancelled")]
	Cancelled,

	/// The backend refused the query.
	#[error("hero backend unavailable for '{term}'")]
	Unavailable { term: String },

	/// A roster file could not be parsed.
	#[error("invalid hero roster: {0}")]
	InvalidRoster(#[from] serde_json::Error),
}
