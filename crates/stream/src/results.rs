use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::term::Term;

/// Records produced for one settled term.
#[derive(Debug, PartialEq, Eq)]
pub struct QueryResult<R> {
	/// Term the query was issued for.
	pub term: Term,
	/// Records in the order the service returned them.
	pub records: Arc<[R]>,
	/// Generation of the request that produced the records.
	pub generation: u64,
	/// Whether `records` is the configured fallback after a failed request.
	pub failed: bool,
}

impl<R> QueryResult<R> {
	#[must_use]
	pub fn records(&self) -> &[R] {
		&self.records
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.records.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl<R> Clone for QueryResult<R> {
	fn clone(&self) -> Self {
		Self {
			term: self.term.clone(),
			records: Arc::clone(&self.records),
			generation: self.generation,
			failed: self.failed,
		}
	}
}

/// Render callback fed by [`Subscription::pump`].
pub trait ResultView<R> {
	fn render(&mut self, result: QueryResult<R>);
}

impl<R, F> ResultView<R> for F
where
	F: FnMut(QueryResult<R>),
{
	fn render(&mut self, result: QueryResult<R>) {
		self(result);
	}
}

/// Broadcast point every pipeline emission goes through.
///
/// Subscribers see emissions from the moment they subscribe; nothing is
/// replayed.
pub struct ResultStream<R> {
	subscribers: Arc<Mutex<Vec<Sender<QueryResult<R>>>>>,
}

impl<R> ResultStream<R> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			subscribers: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Attach a new subscriber.
	pub fn subscribe(&self) -> Subscription<R> {
		let (tx, rx) = mpsc::channel();
		self.subscribers
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(tx);
		Subscription { rx }
	}

	/// Deliver `result` to every live subscriber, pruning disposed ones.
	/// Returns the number of subscribers reached.
	pub fn publish(&self, result: QueryResult<R>) -> usize {
		let mut subscribers = self
			.subscribers
			.lock()
			.unwrap_or_else(PoisonError::into_inner);
		subscribers.retain(|tx| tx.send(result.clone()).is_ok());
		subscribers.len()
	}

	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.subscribers
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}
}

impl<R> Clone for ResultStream<R> {
	fn clone(&self) -> Self {
		Self {
			subscribers: Arc::clone(&self.subscribers),
		}
	}
}

impl<R> Default for ResultStream<R> {
	fn default() -> Self {
		Self::new()
	}
}

/// One subscriber's view of the result stream. Dropping it detaches.
pub struct Subscription<R> {
	rx: Receiver<QueryResult<R>>,
}

impl<R> Subscription<R> {
	/// Block until the next emission, or until the stream is gone.
	pub fn recv(&self) -> Option<QueryResult<R>> {
		self.rx.recv().ok()
	}

	pub fn recv_timeout(&self, timeout: Duration) -> Option<QueryResult<R>> {
		self.rx.recv_timeout(timeout).ok()
	}

	pub fn try_recv(&self) -> Option<QueryResult<R>> {
		self.rx.try_recv().ok()
	}

	/// Hand every emission waiting on the channel to `view`, returning how
	/// many were rendered.
	pub fn pump(&self, view: &mut impl ResultView<R>) -> usize {
		let mut rendered = 0;
		while let Ok(result) = self.rx.try_recv() {
			view.render(result);
			rendered += 1;
		}
		rendered
	}

	/// Detach from the stream.
	pub fn dispose(self) {}
}

impl<R> Iterator for Subscription<R> {
	type Item = QueryResult<R>;

	fn next(&mut self) -> Option<Self::Item> {
		self.recv()
	}
}
