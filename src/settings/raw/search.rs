use std::time::Duration;

use hero_search::{BlankTerms, DEFAULT_DEBOUNCE, Normalization, PipelineOptions};
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` section: how terms are admitted, debounced and deduplicated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) debounce_ms: Option<u64>,
	pub(super) skip_blank: Option<bool>,
	pub(super) trim: Option<bool>,
	pub(super) case_insensitive: Option<bool>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.debounce_ms {
			self.debounce_ms = Some(value);
		}
		if let Some(value) = cli.skip_blank {
			self.skip_blank = Some(value);
		}
		if let Some(value) = cli.trim {
			self.trim = Some(value);
		}
		if let Some(value) = cli.case_insensitive {
			self.case_insensitive = Some(value);
		}
	}

	pub(super) fn resolve(&self) -> PipelineOptions {
		let debounce = self
			.debounce_ms
			.map_or(DEFAULT_DEBOUNCE, Duration::from_millis);
		let blank_terms = if self.skip_blank.unwrap_or(false) {
			BlankTerms::Skip
		} else {
			BlankTerms::Query
		};
		let normalization = Normalization {
			trim: self.trim.unwrap_or(false),
			case_insensitive: self.case_insensitive.unwrap_or(false),
		};

		PipelineOptions {
			debounce,
			blank_terms,
			normalization,
		}
	}
}
