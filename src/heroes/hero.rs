use serde::{Deserialize, Serialize};

use super::error::HeroError;

/// A single record of the hero roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
	pub id: u32,
	pub name: String,
}

impl Hero {
	#[must_use]
	pub fn new(id: u32, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// Roster the store starts with when no roster file is configured.
#[must_use]
pub fn mock_heroes() -> Vec<Hero> {
	[
		(12, "Dr. Nice"),
		(13, "Bombasto"),
		(14, "Celeritas"),
		(15, "Magneta"),
		(16, "RubberMan"),
		(17, "Dynama"),
		(18, "Dr. IQ"),
		(19, "Magma"),
		(20, "Tornado"),
	]
	.into_iter()
	.map(|(id, name)| Hero::new(id, name))
	.collect()
}

/// Parse a JSON array of `{ "id": .., "name": .. }` objects.
pub fn parse_roster(json: &str) -> Result<Vec<Hero>, HeroError> {
	Ok(serde_json::from_str(json)?)
}
