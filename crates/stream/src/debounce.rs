use std::time::{Duration, Instant};

use crate::term::Term;

/// Single-timer debounce stage.
///
/// Holds at most one pending term. Each arrival replaces it and restarts the
/// quiet period, so only the most recent term of a burst survives.
#[derive(Debug)]
pub struct Debouncer {
	window: Duration,
	pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
	term: Term,
	deadline: Instant,
}

impl Debouncer {
	#[must_use]
	pub fn new(window: Duration) -> Self {
		Self {
			window,
			pending: None,
		}
	}

	/// Start or restart the quiet period for `term`, returning the term it
	/// replaced, if any.
	pub fn push(&mut self, term: Term, now: Instant) -> Option<Term> {
		let deadline = now + self.window;
		self.pending
			.replace(Pending { term, deadline })
			.map(|previous| previous.term)
	}

	/// Instant at which the pending term settles.
	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|pending| pending.deadline)
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Release the pending term once its quiet period has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<Term> {
		let due = self
			.pending
			.as_ref()
			.is_some_and(|pending| pending.deadline <= now);
		if !due {
			return None;
		}
		self.pending.take().map(|pending| pending.term)
	}
}
