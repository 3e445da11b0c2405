use super::{ConfigError, ConfigSources, MAX_LATENCY, ResolvedConfig, SettingKey};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.pipeline.debounce.is_zero() {
		return Err(ConfigError::invalid(
			SettingKey::DebounceMs,
			config.pipeline.debounce.as_millis(),
			sources.source_for(SettingKey::DebounceMs),
			"must be greater than zero",
		));
	}

	if config.latency > MAX_LATENCY {
		return Err(ConfigError::invalid(
			SettingKey::LatencyMs,
			config.latency.as_millis(),
			sources.source_for(SettingKey::LatencyMs),
			format!("must not exceed {}", MAX_LATENCY.as_millis()),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use hero_search::{MatchMode, PipelineOptions};

	use super::super::SettingSource;
	use super::*;

	fn config(debounce: Duration, latency: Duration) -> ResolvedConfig {
		ResolvedConfig {
			pipeline: PipelineOptions::default().with_debounce(debounce),
			latency,
			match_mode: MatchMode::Substring,
			fail_terms: Vec::new(),
			heroes_file: None,
		}
	}

	#[test]
	fn defaults_are_valid() {
		let config = config(Duration::from_millis(300), Duration::ZERO);
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_debounce() {
		let config = config(Duration::ZERO, Duration::ZERO);
		let sources = ConfigSources {
			debounce_ms: Some(SettingSource::CliFlag("--debounce-ms")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, SettingKey::DebounceMs);
		let message = err.to_string();
		assert!(message.contains("`0`"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_excessive_latency() {
		let config = config(Duration::from_millis(300), Duration::from_millis(60_001));
		let sources = ConfigSources {
			latency_ms: Some(SettingSource::Environment(
				"HERO_SEARCH__SERVICE__LATENCY_MS",
			)),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, SettingKey::LatencyMs);
		let message = err.to_string();
		assert!(message.contains("`60001`"));
		assert!(message.contains("environment variable"));
	}

	#[test]
	fn latency_at_the_limit_is_accepted() {
		let config = config(Duration::from_millis(1), MAX_LATENCY);
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}
}
