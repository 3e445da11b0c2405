use thiserror::Error;

/// Errors raised when the streaming primitives are wired up incorrectly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
	/// The term stream was already handed to a consumer.
	#[error("term stream already has a consumer")]
	AlreadyObserved,
}
