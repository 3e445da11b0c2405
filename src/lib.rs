//! Incremental hero search.
//!
//! The debounce, dedupe and latest-wins machinery lives in
//! [`hero_search_stream`] and is re-exported here. This crate adds the hero
//! roster and its search backend, a shared message log, and the ambient
//! pieces used by the `hero-search` binary.

pub mod app_dirs;
pub mod heroes;
pub mod logging;
pub mod messages;

pub use heroes::{Hero, HeroError, HeroSearchService, HeroStore, MatchMode};
pub use messages::MessageLog;

pub use hero_search_stream::{
	BlankTerms, CancelToken, DEFAULT_DEBOUNCE, FailureReporter, Normalization, PipelineBuilder,
	PipelineOptions, PipelineState, QueryResult, QueryService, ResultStream, ResultView,
	SearchPipeline, StreamError, Subscription, Term, TermInput, TermStream,
};
