use std::path::PathBuf;
use std::time::Duration;

use hero_search::{MatchMode, PipelineOptions};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::{ConfigError, SettingKey};
pub(crate) use sources::{ConfigSources, SettingSource};

/// Longest simulated backend latency accepted from configuration.
pub(crate) const MAX_LATENCY: Duration = Duration::from_secs(60);

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub pipeline: PipelineOptions,
	pub latency: Duration,
	pub match_mode: MatchMode,
	/// Terms the hero backend refuses, for exercising failure handling.
	pub fail_terms: Vec<String>,
	pub heroes_file: Option<PathBuf>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
