use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use hero_search_stream::{CancelToken, QueryService, Term};

use super::error::HeroError;
use super::hero::Hero;
use super::matching::MatchMode;
use super::store::HeroStore;

/// Granularity at which simulated latency re-checks the cancel token.
const LATENCY_SLICE: Duration = Duration::from_millis(10);

/// [`QueryService`] answering searches from a [`HeroStore`].
///
/// Each query sleeps for the configured latency first, giving up with
/// [`HeroError::Cancelled`] once a newer request supersedes it.
#[derive(Debug, Clone)]
pub struct HeroSearchService {
	store: HeroStore,
	mode: MatchMode,
	latency: Duration,
	failing: HashSet<String>,
}

impl HeroSearchService {
	pub fn new(store: HeroStore) -> Self {
		Self {
			store,
			mode: MatchMode::default(),
			latency: Duration::ZERO,
			failing: HashSet::new(),
		}
	}

	#[must_use]
	pub fn with_mode(mut self, mode: MatchMode) -> Self {
		self.mode = mode;
		self
	}

	#[must_use]
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}

	/// Make queries for `term` fail with [`HeroError::Unavailable`].
	#[must_use]
	pub fn failing_on(mut self, term: impl Into<String>) -> Self {
		self.failing.insert(term.into());
		self
	}

	fn wait(&self, cancel: &CancelToken) -> Result<(), HeroError> {
		let deadline = Instant::now() + self.latency;
		loop {
			if cancel.is_cancelled() {
				return Err(HeroError::Cancelled);
			}
			let now = Instant::now();
			if now >= deadline {
				return Ok(());
			}
			thread::sleep(LATENCY_SLICE.min(deadline - now));
		}
	}
}

impl QueryService for HeroSearchService {
	type Record = Hero;
	type Error = HeroError;

	fn query(&self, term: &Term, cancel: &CancelToken) -> Result<Vec<Hero>, HeroError> {
		self.wait(cancel)?;
		if self.failing.contains(term.as_str()) {
			return Err(HeroError::Unavailable {
				term: term.to_string(),
			});
		}
		Ok(self.store.search(term, self.mode))
	}
}
