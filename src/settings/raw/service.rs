use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;

/// `[service]` section: the hero backend the pipeline queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ServiceSection {
	pub(super) latency_ms: Option<u64>,
	pub(super) match_mode: Option<String>,
	pub(super) fail_terms: Option<Vec<String>>,
	pub(super) heroes_file: Option<PathBuf>,
}

impl ServiceSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.latency_ms {
			self.latency_ms = Some(value);
		}
		if let Some(mode) = cli.match_mode {
			self.match_mode = Some(mode.as_str().to_string());
		}
		if !cli.fail_on.is_empty() {
			self.fail_terms = Some(cli.fail_on.clone());
		}
		if let Some(path) = cli.heroes.clone() {
			self.heroes_file = Some(path);
		}
	}

	pub(super) fn latency(&self) -> Duration {
		Duration::from_millis(self.latency_ms.unwrap_or(0))
	}
}
