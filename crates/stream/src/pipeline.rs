use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::coalescer::{Coalescer, PipelineState};
use crate::config::PipelineOptions;
use crate::input::TermStream;
use crate::results::{ResultStream, Subscription};
use crate::service::{FailureReporter, LogReporter, QueryService};
use crate::worker::{PipelineEvent, StateCell, Worker, pump_terms};

/// Configures and launches a [`SearchPipeline`].
pub struct PipelineBuilder<S: QueryService> {
	service: S,
	options: PipelineOptions,
	fallback: Vec<S::Record>,
	reporter: Arc<dyn FailureReporter>,
}

impl<S: QueryService> PipelineBuilder<S> {
	fn new(service: S) -> Self {
		Self {
			service,
			options: PipelineOptions::default(),
			fallback: Vec::new(),
			reporter: Arc::new(LogReporter),
		}
	}

	#[must_use]
	pub fn options(mut self, options: PipelineOptions) -> Self {
		self.options = options;
		self
	}

	#[must_use]
	pub fn debounce(mut self, window: Duration) -> Self {
		self.options.debounce = window;
		self
	}

	/// Records emitted in place of a failed query's result. Empty by default.
	#[must_use]
	pub fn fallback(mut self, records: Vec<S::Record>) -> Self {
		self.fallback = records;
		self
	}

	/// Collaborator notified about failed queries whose fallback was emitted.
	#[must_use]
	pub fn reporter(mut self, reporter: impl FailureReporter) -> Self {
		self.reporter = Arc::new(reporter);
		self
	}

	/// Start consuming `stream` on a background worker thread.
	pub fn spawn(self, stream: TermStream) -> SearchPipeline<S> {
		let Self {
			service,
			options,
			fallback,
			reporter,
		} = self;

		let (events_tx, events_rx) = mpsc::channel();
		let results = ResultStream::new();
		let state = Arc::new(StateCell::new());
		let submitted = stream.submission_counter();

		let pump_tx = events_tx.clone();
		thread::spawn(move || pump_terms(stream, pump_tx));

		let worker = Worker::new(
			Arc::new(service),
			Coalescer::new(&options, fallback.into()),
			events_rx,
			events_tx.clone(),
			results.clone(),
			reporter,
			Arc::clone(&state),
		);
		let handle = thread::spawn(move || worker.run());
		log::debug!(
			"search pipeline started with a {}ms debounce window",
			options.debounce.as_millis()
		);

		SearchPipeline {
			events: events_tx,
			results,
			state,
			submitted,
			worker: Some(handle),
		}
	}
}

/// Handle to a running debounce, dedupe and latest-wins dispatch pipeline.
///
/// Dropping the handle shuts the pipeline down. Requests still running at that
/// point finish in the background and their results are discarded.
pub struct SearchPipeline<S: QueryService> {
	events: Sender<PipelineEvent<S::Record, S::Error>>,
	results: ResultStream<S::Record>,
	state: Arc<StateCell>,
	submitted: Arc<AtomicU64>,
	worker: Option<JoinHandle<()>>,
}

impl<S: QueryService> SearchPipeline<S> {
	pub fn builder(service: S) -> PipelineBuilder<S> {
		PipelineBuilder::new(service)
	}

	/// Spawn a pipeline with default options.
	pub fn spawn(service: S, stream: TermStream) -> Self {
		Self::builder(service).spawn(stream)
	}

	/// Attach a subscriber to the result stream.
	pub fn subscribe(&self) -> Subscription<S::Record> {
		self.results.subscribe()
	}

	#[must_use]
	pub fn state(&self) -> PipelineState {
		self.state.state()
	}

	/// Block until every submitted term has been consumed and no request is
	/// live. Returns `false` if `timeout` elapses first.
	pub fn wait_idle(&self, timeout: Duration) -> bool {
		self.state.wait_idle(&self.submitted, timeout)
	}

	/// Stop the worker and wait for it to exit.
	pub fn shutdown(mut self) {
		self.stop();
	}

	fn stop(&mut self) {
		let Some(worker) = self.worker.take() else {
			return;
		};
		let _ = self.events.send(PipelineEvent::Shutdown);
		if worker.join().is_err() {
			log::warn!("search pipeline worker panicked");
		}
	}
}

impl<S: QueryService> Drop for SearchPipeline<S> {
	fn drop(&mut self) {
		self.stop();
	}
}
