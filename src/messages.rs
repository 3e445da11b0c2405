//! Shared log of user-facing messages produced by the hero store and the
//! search pipeline.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hero_search_stream::{FailureReporter, Term};

/// Append-only message log shared between the store and the pipeline.
///
/// Every message is mirrored to `log::info!` as it is added.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
	entries: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	fn lock(&self) -> MutexGuard<'_, Vec<String>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn add(&self, message: impl Into<String>) {
		let message = message.into();
		log::info!("{message}");
		self.lock().push(message);
	}

	pub fn clear(&self) {
		self.lock().clear();
	}

	/// Snapshot of every message in insertion order.
	#[must_use]
	pub fn messages(&self) -> Vec<String> {
		self.lock().clone()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.lock().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}
}

impl FailureReporter for MessageLog {
	fn report(&self, term: &Term, error: &dyn fmt::Display) {
		self.add(format!("HeroService: search for \"{term}\" failed: {error}"));
	}
}
