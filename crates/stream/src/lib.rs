//! Streaming primitives that turn raw keystrokes into an ordered stream of
//! search results.
//!
//! Terms submitted through a [`TermInput`] pass three independent stages on a
//! single worker thread:
//!
//! 1. a single-timer [`Debouncer`] that only lets the last term of a burst
//!    through once the input has been quiet for the configured window,
//! 2. a [`Deduplicator`] that drops a settled term equal to the last one
//!    forwarded,
//! 3. latest-wins dispatch driven by [`Generations`]: every request carries a
//!    generation id, and a completion is only emitted if no newer request was
//!    dispatched in the meantime.
//!
//! The decision logic lives in the clock-free [`Coalescer`]; the
//! [`SearchPipeline`] runs it against real time and a [`QueryService`],
//! publishing to a multi-subscriber [`ResultStream`].
//!
//! ```
//! use std::time::Duration;
//!
//! use hero_search_stream::{query_fn, CancelToken, SearchPipeline, Term, TermInput};
//!
//! let service = query_fn(|term: &Term, _cancel: &CancelToken| {
//!     Ok::<_, String>(vec![term.len()])
//! });
//! let (input, stream) = TermInput::channel();
//! let pipeline = SearchPipeline::builder(service)
//!     .debounce(Duration::from_millis(20))
//!     .spawn(stream);
//! let results = pipeline.subscribe();
//!
//! input.submit("m");
//! input.submit("ma");
//! input.submit("mag");
//!
//! let result = results.recv_timeout(Duration::from_secs(2)).expect("one result");
//! assert_eq!(result.term.as_str(), "mag");
//! assert_eq!(result.records(), &[3]);
//! ```

mod coalescer;
mod config;
mod debounce;
mod dedupe;
mod error;
mod generation;
mod input;
mod pipeline;
mod results;
mod service;
mod term;
mod worker;

pub use coalescer::{Action, Coalescer, Dispatch, Emission, PipelineState};
pub use config::{BlankTerms, DEFAULT_DEBOUNCE, PipelineOptions};
pub use debounce::Debouncer;
pub use dedupe::Deduplicator;
pub use error::StreamError;
pub use generation::{CancelToken, Generations, Verdict};
pub use input::{TermInput, TermStream};
pub use pipeline::{PipelineBuilder, SearchPipeline};
pub use results::{QueryResult, ResultStream, ResultView, Subscription};
pub use service::{FailureReporter, FnService, LogReporter, QueryService, query_fn};
pub use term::{Normalization, Term};
