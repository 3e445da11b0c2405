use std::fmt;

use super::errors::SettingKey;

/// Where a configuration value came from.
#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origins of the settings that are validated, when they were set at all.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) debounce_ms: Option<SettingSource>,
	pub(crate) latency_ms: Option<SettingSource>,
	pub(crate) match_mode: Option<SettingSource>,
}

impl ConfigSources {
	/// Origin of `key`, defaulting to its configuration key.
	pub(crate) fn source_for(&self, key: SettingKey) -> SettingSource {
		let recorded = match key {
			SettingKey::DebounceMs => &self.debounce_ms,
			SettingKey::LatencyMs => &self.latency_ms,
			SettingKey::MatchMode => &self.match_mode,
		};
		recorded
			.clone()
			.unwrap_or(SettingSource::ConfigKey(key.config_key()))
	}
}
