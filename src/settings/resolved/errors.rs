use std::fmt;

use thiserror::Error;

use super::SettingSource;

/// Settings whose values are checked after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingKey {
	DebounceMs,
	LatencyMs,
	MatchMode,
}

impl SettingKey {
	/// Dotted path inside the configuration file.
	pub(crate) fn config_key(self) -> &'static str {
		match self {
			Self::DebounceMs => "search.debounce_ms",
			Self::LatencyMs => "service.latency_ms",
			Self::MatchMode => "service.match_mode",
		}
	}

	pub(crate) fn env_var(self) -> &'static str {
		match self {
			Self::DebounceMs => "HERO_SEARCH__SEARCH__DEBOUNCE_MS",
			Self::LatencyMs => "HERO_SEARCH__SERVICE__LATENCY_MS",
			Self::MatchMode => "HERO_SEARCH__SERVICE__MATCH_MODE",
		}
	}

	pub(crate) fn cli_flag(self) -> &'static str {
		match self {
			Self::DebounceMs => "--debounce-ms",
			Self::LatencyMs => "--latency-ms",
			Self::MatchMode => "--match",
		}
	}
}

impl fmt::Display for SettingKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.config_key())
	}
}

/// A resolved setting that failed validation.
#[derive(Debug, Error)]
#[error("invalid {key} `{value}` from {origin}: {reason}")]
pub(crate) struct ConfigError {
	pub(crate) key: SettingKey,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl ConfigError {
	pub(crate) fn invalid(
		key: SettingKey,
		value: impl fmt::Display,
		origin: SettingSource,
		reason: impl Into<String>,
	) -> Self {
		Self {
			key,
			value: value.to_string(),
			origin,
			reason: reason.into(),
		}
	}
}
