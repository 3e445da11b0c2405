use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::error::StreamError;
use crate::term::Term;

/// Producer side of the input adapter.
///
/// Every call to [`TermInput::submit`] becomes one [`Term`] on the paired
/// [`TermStream`]. The handle is cheap to clone, so several producers may feed
/// the same stream. No filtering or buffering limit is applied here.
#[derive(Clone)]
pub struct TermInput {
	tx: Sender<Term>,
	submitted: Arc<AtomicU64>,
	unobserved: Arc<Mutex<Option<TermStream>>>,
}

impl TermInput {
	/// Create an adapter whose stream is claimed later via [`TermInput::observe`].
	#[must_use]
	pub fn new() -> Self {
		let (tx, rx) = mpsc::channel();
		let submitted = Arc::new(AtomicU64::new(0));
		let stream = TermStream {
			rx,
			submitted: Arc::clone(&submitted),
		};
		Self {
			tx,
			submitted,
			unobserved: Arc::new(Mutex::new(Some(stream))),
		}
	}

	/// Create an adapter and immediately claim its stream.
	#[must_use]
	pub fn channel() -> (Self, TermStream) {
		let (tx, rx) = mpsc::channel();
		let submitted = Arc::new(AtomicU64::new(0));
		let stream = TermStream {
			rx,
			submitted: Arc::clone(&submitted),
		};
		let input = Self {
			tx,
			submitted,
			unobserved: Arc::new(Mutex::new(None)),
		};
		(input, stream)
	}

	/// Push a new term. Never blocks the caller.
	pub fn submit(&self, term: impl Into<Term>) {
		let term = term.into();
		self.submitted.fetch_add(1, AtomicOrdering::AcqRel);
		if self.tx.send(term).is_err() {
			self.submitted.fetch_sub(1, AtomicOrdering::AcqRel);
			log::debug!("term stream consumer is gone; dropping submission");
		}
	}

	/// Number of terms accepted so far.
	#[must_use]
	pub fn submitted(&self) -> u64 {
		self.submitted.load(AtomicOrdering::Acquire)
	}

	/// Hand the term stream to its single consumer.
	pub fn observe(&self) -> Result<TermStream, StreamError> {
		self.unobserved
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.take()
			.ok_or(StreamError::AlreadyObserved)
	}
}

impl Default for TermInput {
	fn default() -> Self {
		Self::new()
	}
}

/// Consumer side of the input adapter, yielding terms in submission order.
pub struct TermStream {
	rx: Receiver<Term>,
	submitted: Arc<AtomicU64>,
}

impl TermStream {
	/// Block until the next term arrives, or every producer is gone.
	pub fn recv(&self) -> Option<Term> {
		self.rx.recv().ok()
	}

	pub fn recv_timeout(&self, timeout: Duration) -> Result<Term, RecvTimeoutError> {
		self.rx.recv_timeout(timeout)
	}

	pub fn try_recv(&self) -> Result<Term, TryRecvError> {
		self.rx.try_recv()
	}

	pub(crate) fn submission_counter(&self) -> Arc<AtomicU64> {
		Arc::clone(&self.submitted)
	}
}

impl Iterator for TermStream {
	type Item = Term;

	fn next(&mut self) -> Option<Term> {
		self.recv()
	}
}
