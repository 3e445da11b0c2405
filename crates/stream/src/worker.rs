use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::coalescer::{Action, Coalescer, Dispatch, Emission, PipelineState};
use crate::input::TermStream;
use crate::results::ResultStream;
use crate::service::{FailureReporter, QueryService};
use crate::term::Term;

/// Messages understood by the pipeline worker.
pub(crate) enum PipelineEvent<R, E> {
	/// A term forwarded from the input adapter.
	Term(Term),
	/// A query request finished, successfully or not.
	Completed {
		generation: u64,
		term: Term,
		outcome: Result<Vec<R>, E>,
	},
	/// Every input producer is gone.
	InputClosed,
	/// Stop the worker.
	Shutdown,
}

#[derive(Debug)]
struct Snapshot {
	state: PipelineState,
	received: u64,
	running: bool,
}

/// Pipeline state mirrored out of the worker for observers.
pub(crate) struct StateCell {
	snapshot: Mutex<Snapshot>,
	changed: Condvar,
}

impl StateCell {
	pub(crate) fn new() -> Self {
		Self {
			snapshot: Mutex::new(Snapshot {
				state: PipelineState::Idle,
				received: 0,
				running: true,
			}),
			changed: Condvar::new(),
		}
	}

	fn lock(&self) -> MutexGuard<'_, Snapshot> {
		self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn update(&self, apply: impl FnOnce(&mut Snapshot)) {
		apply(&mut self.lock());
		self.changed.notify_all();
	}

	pub(crate) fn state(&self) -> PipelineState {
		self.lock().state
	}

	/// Block until every submitted term reached the worker and the pipeline
	/// is idle. Returns `false` on timeout.
	pub(crate) fn wait_idle(&self, submitted: &AtomicU64, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		let mut snapshot = self.lock();
		loop {
			if !snapshot.running {
				return true;
			}
			let drained = snapshot.received >= submitted.load(AtomicOrdering::Acquire);
			if drained && snapshot.state == PipelineState::Idle {
				return true;
			}

			let now = Instant::now();
			if now >= deadline {
				return false;
			}
			snapshot = match self.changed.wait_timeout(snapshot, deadline - now) {
				Ok((guard, _)) => guard,
				Err(poisoned) => poisoned.into_inner().0,
			};
		}
	}
}

/// Forward terms from the input adapter into the worker's event channel.
pub(crate) fn pump_terms<R, E>(stream: TermStream, events: Sender<PipelineEvent<R, E>>) {
	for term in stream {
		if events.send(PipelineEvent::Term(term)).is_err() {
			return;
		}
	}
	let _ = events.send(PipelineEvent::InputClosed);
}

/// Single-threaded driver for a [`Coalescer`].
pub(crate) struct Worker<S: QueryService> {
	service: Arc<S>,
	coalescer: Coalescer<S::Record, S::Error>,
	events: Receiver<PipelineEvent<S::Record, S::Error>>,
	completions: Sender<PipelineEvent<S::Record, S::Error>>,
	results: ResultStream<S::Record>,
	reporter: Arc<dyn FailureReporter>,
	state: Arc<StateCell>,
}

impl<S: QueryService> Worker<S> {
	pub(crate) fn new(
		service: Arc<S>,
		coalescer: Coalescer<S::Record, S::Error>,
		events: Receiver<PipelineEvent<S::Record, S::Error>>,
		completions: Sender<PipelineEvent<S::Record, S::Error>>,
		results: ResultStream<S::Record>,
		reporter: Arc<dyn FailureReporter>,
		state: Arc<StateCell>,
	) -> Self {
		Self {
			service,
			coalescer,
			events,
			completions,
			results,
			reporter,
			state,
		}
	}

	pub(crate) fn run(mut self) {
		while let Some(event) = self.next_event() {
			if !self.handle(event) {
				break;
			}
			self.publish_state();
		}
		log::debug!("search pipeline worker stopped");
		self.state.update(|snapshot| {
			snapshot.state = PipelineState::Idle;
			snapshot.running = false;
		});
	}

	/// Wait for the next event, settling debounced terms whenever their
	/// deadline passes in between.
	fn next_event(&mut self) -> Option<PipelineEvent<S::Record, S::Error>> {
		loop {
			let Some(deadline) = self.coalescer.deadline() else {
				return self.events.recv().ok();
			};

			let now = Instant::now();
			if deadline <= now {
				self.settle(now);
				continue;
			}

			match self.events.recv_timeout(deadline - now) {
				Ok(event) => return Some(event),
				Err(RecvTimeoutError::Timeout) => self.settle(Instant::now()),
				Err(RecvTimeoutError::Disconnected) => return None,
			}
		}
	}

	fn settle(&mut self, now: Instant) {
		if let Some(action) = self.coalescer.on_deadline(now) {
			self.apply(action);
		}
		self.publish_state();
	}

	fn handle(&mut self, event: PipelineEvent<S::Record, S::Error>) -> bool {
		match event {
			PipelineEvent::Term(term) => {
				log::trace!("received {term:?}");
				if let Some(action) = self.coalescer.on_term(term, Instant::now()) {
					self.apply(action);
				}
				// The count and the state it produced become visible together.
				let state = self.coalescer.state();
				self.state.update(|snapshot| {
					snapshot.received += 1;
					snapshot.state = state;
				});
				true
			}
			PipelineEvent::Completed {
				generation,
				term,
				outcome,
			} => {
				if let Some(emission) = self.coalescer.on_complete(generation, term, outcome) {
					self.emit(emission);
				}
				true
			}
			PipelineEvent::InputClosed => {
				log::debug!("term input closed; draining outstanding work");
				true
			}
			PipelineEvent::Shutdown => false,
		}
	}

	fn apply(&mut self, action: Action<S::Record, S::Error>) {
		match action {
			Action::Dispatch(dispatch) => self.dispatch(dispatch),
			Action::Emit(emission) => self.emit(emission),
		}
	}

	fn dispatch(&self, dispatch: Dispatch) {
		let Dispatch {
			generation,
			term,
			token,
		} = dispatch;
		log::debug!("dispatching generation {generation} for {term:?}");

		let service = Arc::clone(&self.service);
		let completions = self.completions.clone();
		thread::spawn(move || {
			let outcome = service.query(&term, &token);
			let _ = completions.send(PipelineEvent::Completed {
				generation,
				term,
				outcome,
			});
		});
	}

	fn emit(&self, emission: Emission<S::Record, S::Error>) {
		let Emission { result, error } = emission;
		if let Some(error) = &error {
			self.reporter.report(&result.term, error);
		}
		log::debug!(
			"emitting {} record(s) for {:?} (generation {})",
			result.len(),
			result.term,
			result.generation
		);
		self.results.publish(result);
	}

	fn publish_state(&self) {
		let state = self.coalescer.state();
		self.state.update(|snapshot| snapshot.state = state);
	}
}
