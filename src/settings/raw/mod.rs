use std::env;

use anyhow::{Error, Result};
use hero_search::MatchMode;
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingKey, SettingSource};

mod search;
mod service;

use search::SearchSection;
use service::ServiceSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	service: ServiceSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.service.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			debounce_ms: detect_source(
				SettingKey::DebounceMs,
				cli.debounce_ms.is_some(),
				self.search.debounce_ms.is_some(),
			),
			latency_ms: detect_source(
				SettingKey::LatencyMs,
				cli.latency_ms.is_some(),
				self.service.latency_ms.is_some(),
			),
			match_mode: detect_source(
				SettingKey::MatchMode,
				cli.match_mode.is_some(),
				self.service.match_mode.is_some(),
			),
		};

		let match_mode = match self.service.match_mode.as_deref() {
			None => MatchMode::default(),
			Some(value) => MatchMode::parse(value).ok_or_else(|| {
				ConfigError::invalid(
					SettingKey::MatchMode,
					value,
					sources.source_for(SettingKey::MatchMode),
					"expected `substring` or `fuzzy`",
				)
			})?,
		};

		let config = ResolvedConfig {
			pipeline: self.search.resolve(),
			latency: self.service.latency(),
			match_mode,
			fail_terms: self.service.fail_terms.unwrap_or_default(),
			heroes_file: self.service.heroes_file,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	key: SettingKey,
	cli_present: bool,
	value_present: bool,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(key.cli_flag()));
	}

	if env::var_os(key.env_var()).is_some() {
		return Some(SettingSource::Environment(key.env_var()));
	}

	Some(SettingSource::ConfigKey(key.config_key()))
}
