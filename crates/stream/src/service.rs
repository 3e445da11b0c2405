use std::fmt;
use std::marker::PhantomData;

use crate::generation::CancelToken;
use crate::term::Term;

/// Backend the pipeline dispatches settled terms to.
///
/// Calls may overlap and may complete in any order. Implementations are free
/// to ignore `cancel`; honoring it only saves work.
pub trait QueryService: Send + Sync + 'static {
	/// Element type of a query result.
	type Record: Send + Sync + 'static;
	/// Failure reported when a query cannot be answered.
	type Error: fmt::Display + Send + 'static;

	fn query(&self, term: &Term, cancel: &CancelToken) -> Result<Vec<Self::Record>, Self::Error>;
}

/// Query service backed by a closure.
pub struct FnService<F, R, E> {
	query: F,
	_marker: PhantomData<fn() -> (R, E)>,
}

impl<F, R, E> FnService<F, R, E>
where
	F: Fn(&Term, &CancelToken) -> Result<Vec<R>, E>,
{
	pub fn new(query: F) -> Self {
		Self {
			query,
			_marker: PhantomData,
		}
	}
}

impl<F, R, E> QueryService for FnService<F, R, E>
where
	F: Fn(&Term, &CancelToken) -> Result<Vec<R>, E> + Send + Sync + 'static,
	R: Send + Sync + 'static,
	E: fmt::Display + Send + 'static,
{
	type Record = R;
	type Error = E;

	fn query(&self, term: &Term, cancel: &CancelToken) -> Result<Vec<R>, E> {
		(self.query)(term, cancel)
	}
}

/// Shorthand for [`FnService::new`].
pub fn query_fn<F, R, E>(query: F) -> FnService<F, R, E>
where
	F: Fn(&Term, &CancelToken) -> Result<Vec<R>, E>,
{
	FnService::new(query)
}

/// Receives failures of requests whose fallback result was emitted.
///
/// Superseded requests never reach the reporter, whatever their outcome.
pub trait FailureReporter: Send + Sync + 'static {
	fn report(&self, term: &Term, error: &dyn fmt::Display);
}

/// Reporter that forwards failures to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
	fn report(&self, term: &Term, error: &dyn fmt::Display) {
		log::warn!("query for {term:?} failed: {error}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn closures_act_as_services() {
		let service = query_fn(|term: &Term, _cancel: &CancelToken| {
			Ok::<_, String>(term.chars().map(|c| c as u32).collect())
		});
		let records = service
			.query(&Term::from("ab"), &CancelToken::detached())
			.expect("query succeeds");
		assert_eq!(records, vec![97, 98]);
	}
}
