use frizbee::{Config, match_list};
use serde::Deserialize;

use super::hero::Hero;

/// Rosters at least this large get frizbee's prefilter.
const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// How a search term is matched against hero names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// Case-insensitive substring match, in roster order.
	#[default]
	Substring,
	/// Fuzzy match ranked by score.
	Fuzzy,
}

impl MatchMode {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			MatchMode::Substring => "substring",
			MatchMode::Fuzzy => "fuzzy",
		}
	}

	/// Parse the configuration spelling of a mode.
	#[must_use]
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"substring" => Some(MatchMode::Substring),
			"fuzzy" => Some(MatchMode::Fuzzy),
			_ => None,
		}
	}

	/// Return the heroes whose names match `term`.
	#[must_use]
	pub fn matches(self, heroes: &[Hero], term: &str) -> Vec<Hero> {
		match self {
			MatchMode::Substring => substring_matches(heroes, term),
			MatchMode::Fuzzy => fuzzy_matches(heroes, term),
		}
	}
}

fn substring_matches(heroes: &[Hero], term: &str) -> Vec<Hero> {
	let needle = term.to_lowercase();
	heroes
		.iter()
		.filter(|hero| hero.name.to_lowercase().contains(&needle))
		.cloned()
		.collect()
}

fn fuzzy_matches(heroes: &[Hero], term: &str) -> Vec<Hero> {
	let trimmed = term.trim();
	let config = config_for_query(trimmed, heroes.len());
	let haystacks: Vec<&str> = heroes.iter().map(|hero| hero.name.as_str()).collect();

	let mut ranked: Vec<(usize, u16)> = match_list(trimmed, &haystacks, &config)
		.into_iter()
		.filter(|entry| entry.score > 0)
		.map(|entry| (entry.index as usize, entry.score))
		.collect();
	ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	ranked
		.into_iter()
		.filter_map(|(index, _)| heroes.get(index).cloned())
		.collect()
}

/// Builds fuzzy matching options for the provided query and roster size.
pub(crate) fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let mut config = Config {
		prefilter: false,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		_ => 3,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
		config.prefilter = true;
		config.max_typos = Some(allowed_typos);
	} else {
		config.max_typos = None;
	}
	config.sort = false;

	config
}
