use std::sync::Arc;
use std::time::Instant;

use crate::config::{BlankTerms, PipelineOptions};
use crate::debounce::Debouncer;
use crate::dedupe::Deduplicator;
use crate::generation::{CancelToken, Generations, Verdict};
use crate::results::QueryResult;
use crate::term::{Normalization, Term};

/// Externally visible phase of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
	/// Nothing pending and no live request.
	Idle,
	/// A term is waiting for its quiet period to elapse.
	Debouncing,
	/// The request with the given generation is live.
	Dispatching(u64),
}

/// Request the driver must start on behalf of the coalescer.
#[derive(Debug, Clone)]
pub struct Dispatch {
	pub generation: u64,
	pub term: Term,
	pub token: CancelToken,
}

/// Result ready for the result stream, plus the failure behind it if the
/// records are the fallback.
#[derive(Debug)]
pub struct Emission<R, E> {
	pub result: QueryResult<R>,
	pub error: Option<E>,
}

/// Work produced by the coalescer for its driver.
#[derive(Debug)]
pub enum Action<R, E> {
	Dispatch(Dispatch),
	Emit(Emission<R, E>),
}

#[derive(Debug)]
struct Completion<R, E> {
	generation: u64,
	term: Term,
	outcome: Result<Vec<R>, E>,
}

/// Debounce, dedupe and latest-wins dispatch as a clock-free state machine.
///
/// The driver feeds it term arrivals, deadline expiries and request
/// completions together with the current instant, and carries out the
/// [`Action`]s it returns.
#[derive(Debug)]
pub struct Coalescer<R, E> {
	blank_terms: BlankTerms,
	normalization: Normalization,
	debouncer: Debouncer,
	dedupe: Deduplicator,
	generations: Generations,
	fallback: Arc<[R]>,
	held: Option<Completion<R, E>>,
}

impl<R, E> Coalescer<R, E> {
	#[must_use]
	pub fn new(options: &PipelineOptions, fallback: Arc<[R]>) -> Self {
		Self {
			blank_terms: options.blank_terms,
			normalization: options.normalization,
			debouncer: Debouncer::new(options.debounce),
			dedupe: Deduplicator::new(),
			generations: Generations::new(),
			fallback,
			held: None,
		}
	}

	#[must_use]
	pub fn state(&self) -> PipelineState {
		if self.debouncer.is_pending() {
			return PipelineState::Debouncing;
		}
		match self.generations.live() {
			Some(generation) => PipelineState::Dispatching(generation),
			None => PipelineState::Idle,
		}
	}

	/// Instant the driver must wake up at to call [`Coalescer::on_deadline`].
	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.debouncer.deadline()
	}

	/// Admit a newly submitted term.
	///
	/// A pending term whose deadline already passed settles first, so the
	/// returned action, if any, belongs to that earlier term.
	pub fn on_term(&mut self, term: Term, now: Instant) -> Option<Action<R, E>> {
		let overdue = if self.deadline().is_some_and(|deadline| deadline <= now) {
			self.on_deadline(now)
		} else {
			None
		};

		let term = self.normalization.apply(term);
		if self.blank_terms == BlankTerms::Skip && term.is_blank() {
			log::trace!("skipping blank term");
			return overdue;
		}

		if let Some(replaced) = self.debouncer.push(term, now) {
			log::trace!("debounce superseded {replaced:?}");
		}
		self.generations.suspend();
		overdue
	}

	/// Settle the pending term if its quiet period has elapsed.
	pub fn on_deadline(&mut self, now: Instant) -> Option<Action<R, E>> {
		let term = self.debouncer.poll(now)?;

		if !self.dedupe.admit(&term) {
			log::trace!("{term:?} repeats the last forwarded term");
			if self.generations.resume() {
				return None;
			}
			return self.held.take().map(|held| Action::Emit(self.emission(held)));
		}

		self.held = None;
		let token = self.generations.issue(term.clone());
		Some(Action::Dispatch(Dispatch {
			generation: token.generation(),
			term,
			token,
		}))
	}

	/// Record the outcome of a dispatched request.
	pub fn on_complete(
		&mut self,
		generation: u64,
		term: Term,
		outcome: Result<Vec<R>, E>,
	) -> Option<Emission<R, E>> {
		let completion = Completion {
			generation,
			term,
			outcome,
		};
		match self.generations.complete(generation) {
			Verdict::Emit => Some(self.emission(completion)),
			Verdict::Hold => {
				log::trace!("holding generation {generation} while input settles");
				self.held = Some(completion);
				None
			}
			Verdict::Discard => {
				log::trace!("discarding superseded generation {generation}");
				None
			}
		}
	}

	fn emission(&self, completion: Completion<R, E>) -> Emission<R, E> {
		let Completion {
			generation,
			term,
			outcome,
		} = completion;
		match outcome {
			Ok(records) => Emission {
				result: QueryResult {
					term,
					records: records.into(),
					generation,
					failed: false,
				},
				error: None,
			},
			Err(error) => Emission {
				result: QueryResult {
					term,
					records: Arc::clone(&self.fallback),
					generation,
					failed: true,
				},
				error: Some(error),
			},
		}
	}
}

#[cfg(test)]
mod tests;
