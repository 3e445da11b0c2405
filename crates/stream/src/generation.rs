use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::term::Term;

/// Cooperative cancellation handle passed to the query service.
///
/// A token is cancelled as soon as a newer request is dispatched. Services may
/// poll it to abandon work early; the pipeline never relies on that and
/// re-checks the generation before emitting.
#[derive(Clone, Debug)]
pub struct CancelToken {
	generation: u64,
	latest: Arc<AtomicU64>,
}

impl CancelToken {
	/// Token that is never cancelled, for calling a service outside a pipeline.
	#[must_use]
	pub fn detached() -> Self {
		Self {
			generation: 0,
			latest: Arc::new(AtomicU64::new(0)),
		}
	}

	/// Generation of the request this token belongs to.
	#[must_use]
	pub fn generation(&self) -> u64 {
		self.generation
	}

	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.latest.load(AtomicOrdering::Acquire) != self.generation
	}
}

/// What the pipeline should do with a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
	/// The request is the live one; emit its result.
	Emit,
	/// The request is the latest dispatched, but a newer term is still
	/// debouncing. Keep the result until that term settles.
	Hold,
	/// A newer request was dispatched; drop the result.
	Discard,
}

#[derive(Debug)]
struct InFlight {
	generation: u64,
	term: Term,
}

/// Monotonic generation counter enforcing latest-wins dispatch.
///
/// The shared counter is written only by [`Generations::issue`] and read by
/// tokens and by [`Generations::complete`].
#[derive(Debug)]
pub struct Generations {
	latest: Arc<AtomicU64>,
	in_flight: Option<InFlight>,
	suspended: bool,
}

impl Generations {
	#[must_use]
	pub fn new() -> Self {
		Self {
			latest: Arc::new(AtomicU64::new(0)),
			in_flight: None,
			suspended: false,
		}
	}

	/// Generation of the most recently dispatched request, `0` before any.
	#[must_use]
	pub fn latest(&self) -> u64 {
		self.latest.load(AtomicOrdering::Acquire)
	}

	/// Start a new request for `term`, cancelling every earlier one.
	pub fn issue(&mut self, term: Term) -> CancelToken {
		let generation = self.latest().wrapping_add(1);
		self.latest.store(generation, AtomicOrdering::Release);
		self.in_flight = Some(InFlight { generation, term });
		self.suspended = false;
		CancelToken {
			generation,
			latest: Arc::clone(&self.latest),
		}
	}

	/// Stop treating the in-flight request as live because a new term arrived.
	pub fn suspend(&mut self) {
		self.suspended = true;
	}

	/// Make the latest request live again after the pending term turned out to
	/// equal it. Returns whether it is still in flight.
	pub fn resume(&mut self) -> bool {
		self.suspended = false;
		self.in_flight.is_some()
	}

	/// Decide the fate of a completed request.
	pub fn complete(&mut self, generation: u64) -> Verdict {
		let is_current = self
			.in_flight
			.as_ref()
			.is_some_and(|in_flight| in_flight.generation == generation);
		if !is_current || generation != self.latest() {
			return Verdict::Discard;
		}

		self.in_flight = None;
		if self.suspended {
			Verdict::Hold
		} else {
			Verdict::Emit
		}
	}

	/// Generation currently allowed to emit.
	#[must_use]
	pub fn live(&self) -> Option<u64> {
		if self.suspended {
			return None;
		}
		self.in_flight.as_ref().map(|in_flight| in_flight.generation)
	}

	/// Term of the latest request while it is still running.
	#[must_use]
	pub fn in_flight_term(&self) -> Option<&Term> {
		self.in_flight.as_ref().map(|in_flight| &in_flight.term)
	}
}

impl Default for Generations {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn issuing_cancels_the_previous_token() {
		let mut generations = Generations::new();
		let first = generations.issue(Term::from("x"));
		assert_eq!(first.generation(), 1);
		assert!(!first.is_cancelled());

		let second = generations.issue(Term::from("y"));
		assert_eq!(second.generation(), 2);
		assert!(first.is_cancelled());
		assert!(!second.is_cancelled());
	}

	#[test]
	fn superseded_completion_is_discarded() {
		let mut generations = Generations::new();
		let first = generations.issue(Term::from("x"));
		let second = generations.issue(Term::from("y"));

		assert_eq!(generations.complete(second.generation()), Verdict::Emit);
		assert_eq!(generations.complete(first.generation()), Verdict::Discard);
		assert_eq!(generations.live(), None);
	}

	#[test]
	fn completion_is_reported_once() {
		let mut generations = Generations::new();
		let token = generations.issue(Term::from("x"));
		assert_eq!(generations.complete(token.generation()), Verdict::Emit);
		assert_eq!(generations.complete(token.generation()), Verdict::Discard);
	}

	#[test]
	fn suspended_completion_is_held_until_resumed() {
		let mut generations = Generations::new();
		let token = generations.issue(Term::from("x"));
		generations.suspend();
		assert_eq!(generations.live(), None);
		assert!(!token.is_cancelled(), "suspension is not cancellation");

		assert_eq!(generations.complete(token.generation()), Verdict::Hold);
		assert!(!generations.resume(), "nothing left in flight");
	}

	#[test]
	fn resume_restores_the_live_generation() {
		let mut generations = Generations::new();
		let token = generations.issue(Term::from("x"));
		generations.suspend();
		assert!(generations.resume());
		assert_eq!(generations.live(), Some(token.generation()));
		assert_eq!(generations.in_flight_term(), Some(&Term::from("x")));
		assert_eq!(generations.complete(token.generation()), Verdict::Emit);
	}

	#[test]
	fn detached_token_is_never_cancelled() {
		assert!(!CancelToken::detached().is_cancelled());
	}
}
