use std::time::Duration;

use crate::term::Normalization;

/// Quiet period applied when no explicit window is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// How the pipeline treats terms that are empty or whitespace-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankTerms {
	/// Blank terms are ordinary input and produce a query.
	#[default]
	Query,
	/// Blank terms are dropped on arrival, before debouncing.
	Skip,
}

/// Tunables for a single search pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
	/// Minimum quiet period after the last term before it is acted upon.
	pub debounce: Duration,
	/// Policy for empty and whitespace-only terms.
	pub blank_terms: BlankTerms,
	/// Rewrites applied to every admitted term.
	pub normalization: Normalization,
}

impl Default for PipelineOptions {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			blank_terms: BlankTerms::default(),
			normalization: Normalization::default(),
		}
	}
}

impl PipelineOptions {
	#[must_use]
	pub fn with_debounce(mut self, debounce: Duration) -> Self {
		self.debounce = debounce;
		self
	}

	#[must_use]
	pub fn with_blank_terms(mut self, blank_terms: BlankTerms) -> Self {
		self.blank_terms = blank_terms;
		self
	}

	#[must_use]
	pub fn with_normalization(mut self, normalization: Normalization) -> Self {
		self.normalization = normalization;
		self
	}
}
