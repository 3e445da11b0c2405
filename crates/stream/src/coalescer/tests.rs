use std::sync::Arc;
use std::time::{Duration, Instant};

use super::*;
use crate::config::{BlankTerms, PipelineOptions};
use crate::term::{Normalization, Term};

type TestCoalescer = Coalescer<&'static str, String>;

fn coalescer_with(options: PipelineOptions) -> TestCoalescer {
	Coalescer::new(&options, Arc::from(Vec::new()))
}

fn coalescer() -> TestCoalescer {
	coalescer_with(PipelineOptions::default())
}

fn at(origin: Instant, millis: u64) -> Instant {
	origin + Duration::from_millis(millis)
}

fn expect_dispatch(action: Option<Action<&'static str, String>>) -> Dispatch {
	match action {
		Some(Action::Dispatch(dispatch)) => dispatch,
		other => panic!("expected a dispatch, got {other:?}"),
	}
}

#[test]
fn burst_dispatches_only_the_last_term() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	assert!(coalescer.on_term(Term::from("a"), origin).is_none());
	assert!(coalescer.on_term(Term::from("ab"), at(origin, 100)).is_none());
	assert!(coalescer.on_term(Term::from("abc"), at(origin, 250)).is_none());
	assert_eq!(coalescer.state(), PipelineState::Debouncing);
	assert_eq!(coalescer.deadline(), Some(at(origin, 550)));
	assert!(coalescer.on_deadline(at(origin, 549)).is_none());

	let dispatch = expect_dispatch(coalescer.on_deadline(at(origin, 550)));
	assert_eq!(dispatch.term, Term::from("abc"));
	assert_eq!(dispatch.generation, 1);
	assert_eq!(coalescer.state(), PipelineState::Dispatching(1));

	let emission = coalescer
		.on_complete(dispatch.generation, dispatch.term, Ok(vec!["Magneta"]))
		.expect("live request emits");
	assert_eq!(emission.result.term, Term::from("abc"));
	assert_eq!(emission.result.records(), &["Magneta"]);
	assert!(!emission.result.failed);
	assert!(emission.error.is_none());
	assert_eq!(coalescer.state(), PipelineState::Idle);
	assert!(coalescer.on_deadline(at(origin, 600)).is_none());
}

#[test]
fn late_completion_of_superseded_request_is_discarded() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("x"), origin);
	let x = expect_dispatch(coalescer.on_deadline(at(origin, 300)));

	coalescer.on_term(Term::from("y"), at(origin, 400));
	assert_eq!(coalescer.state(), PipelineState::Debouncing);
	let y = expect_dispatch(coalescer.on_deadline(at(origin, 700)));
	assert_eq!(y.generation, 2);
	assert!(x.token.is_cancelled());

	let emitted = coalescer
		.on_complete(y.generation, y.term, Ok(vec!["Dr. IQ"]))
		.expect("y is live");
	assert_eq!(emitted.result.term, Term::from("y"));

	assert!(coalescer.on_complete(x.generation, x.term, Ok(vec!["stale"])).is_none());
	assert_eq!(coalescer.state(), PipelineState::Idle);
}

#[test]
fn completion_during_newer_debounce_is_never_emitted() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("x"), origin);
	let x = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	coalescer.on_term(Term::from("y"), at(origin, 400));

	assert!(coalescer.on_complete(x.generation, x.term, Ok(vec!["stale"])).is_none());

	let y = expect_dispatch(coalescer.on_deadline(at(origin, 700)));
	let emitted = coalescer
		.on_complete(y.generation, y.term, Ok(vec!["fresh"]))
		.expect("y is live");
	assert_eq!(emitted.result.records(), &["fresh"]);
	assert!(coalescer.on_deadline(at(origin, 2_000)).is_none());
}

#[test]
fn repeated_settled_term_issues_no_request() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("bomb"), origin);
	let first = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	assert!(coalescer.on_complete(first.generation, first.term, Ok(vec!["Bombasto"])).is_some());

	coalescer.on_term(Term::from("bomb"), at(origin, 1_000));
	assert!(coalescer.on_deadline(at(origin, 1_300)).is_none());
	assert_eq!(coalescer.state(), PipelineState::Idle);

	coalescer.on_term(Term::from("bomba"), at(origin, 2_000));
	let second = expect_dispatch(coalescer.on_deadline(at(origin, 2_300)));
	assert_eq!(second.generation, 2);
}

#[test]
fn returning_to_the_in_flight_term_keeps_its_request() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("x"), origin);
	let x = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	coalescer.on_term(Term::from("xy"), at(origin, 350));
	coalescer.on_term(Term::from("x"), at(origin, 400));

	assert!(coalescer.on_deadline(at(origin, 700)).is_none());
	assert_eq!(coalescer.state(), PipelineState::Dispatching(x.generation));
	assert!(!x.token.is_cancelled());

	let emitted = coalescer
		.on_complete(x.generation, x.term, Ok(vec!["Dynama"]))
		.expect("x is live again");
	assert_eq!(emitted.result.generation, 1);
}

#[test]
fn held_result_is_released_when_input_returns_to_it() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("x"), origin);
	let x = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	coalescer.on_term(Term::from("xy"), at(origin, 350));
	assert!(coalescer.on_complete(x.generation, x.term, Ok(vec!["held"])).is_none());

	coalescer.on_term(Term::from("x"), at(origin, 600));
	match coalescer.on_deadline(at(origin, 900)) {
		Some(Action::Emit(emission)) => {
			assert_eq!(emission.result.term, Term::from("x"));
			assert_eq!(emission.result.records(), &["held"]);
		}
		other => panic!("expected the held result, got {other:?}"),
	}
	assert_eq!(coalescer.state(), PipelineState::Idle);
}

#[test]
fn failure_emits_fallback_and_later_terms_still_run() {
	let origin = Instant::now();
	let mut coalescer =
		TestCoalescer::new(&PipelineOptions::default(), Arc::from(vec!["(no heroes)"]));

	coalescer.on_term(Term::from("t1"), origin);
	let t1 = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	let failed = coalescer
		.on_complete(t1.generation, t1.term, Err("backend down".to_string()))
		.expect("failure still emits");
	assert!(failed.result.failed);
	assert_eq!(failed.result.records(), &["(no heroes)"]);
	assert_eq!(failed.error.as_deref(), Some("backend down"));

	coalescer.on_term(Term::from("t2"), at(origin, 400));
	let t2 = expect_dispatch(coalescer.on_deadline(at(origin, 700)));
	let emitted = coalescer
		.on_complete(t2.generation, t2.term, Ok(vec!["Tornado"]))
		.expect("t2 emits");
	assert!(!emitted.result.failed);
	assert_eq!(emitted.result.term, Term::from("t2"));
}

#[test]
fn superseded_failure_is_silent() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("a"), origin);
	let a = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	coalescer.on_term(Term::from("b"), at(origin, 310));
	let _b = expect_dispatch(coalescer.on_deadline(at(origin, 610)));

	assert!(coalescer.on_complete(a.generation, a.term, Err("timeout".into())).is_none());
}

#[test]
fn blank_terms_are_queried_by_default() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from(""), origin);
	let dispatch = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	assert_eq!(dispatch.term, Term::from(""));
}

#[test]
fn blank_terms_can_be_skipped_before_debounce() {
	let origin = Instant::now();
	let options = PipelineOptions::default().with_blank_terms(BlankTerms::Skip);
	let mut coalescer = coalescer_with(options);

	coalescer.on_term(Term::from("  "), origin);
	assert_eq!(coalescer.state(), PipelineState::Idle);
	assert_eq!(coalescer.deadline(), None);

	coalescer.on_term(Term::from("rubber"), at(origin, 10));
	let dispatch = expect_dispatch(coalescer.on_deadline(at(origin, 310)));
	coalescer.on_term(Term::from(""), at(origin, 320));
	assert_eq!(coalescer.state(), PipelineState::Dispatching(dispatch.generation));
}

#[test]
fn normalization_applies_before_dedupe() {
	let origin = Instant::now();
	let options = PipelineOptions::default().with_normalization(Normalization {
		trim: true,
		case_insensitive: true,
	});
	let mut coalescer = coalescer_with(options);

	coalescer.on_term(Term::from("Mag"), origin);
	let dispatch = expect_dispatch(coalescer.on_deadline(at(origin, 300)));
	assert_eq!(dispatch.term, Term::from("mag"));
	assert!(coalescer.on_complete(dispatch.generation, dispatch.term, Ok(vec![])).is_some());

	coalescer.on_term(Term::from(" MAG "), at(origin, 1_000));
	assert!(coalescer.on_deadline(at(origin, 1_300)).is_none());
}

#[test]
fn overdue_term_settles_before_the_next_arrival() {
	let origin = Instant::now();
	let mut coalescer = coalescer();

	coalescer.on_term(Term::from("a"), origin);
	let dispatch = expect_dispatch(coalescer.on_term(Term::from("b"), at(origin, 300)));
	assert_eq!(dispatch.term, Term::from("a"));
	assert_eq!(coalescer.deadline(), Some(at(origin, 600)));
	assert_eq!(coalescer.state(), PipelineState::Debouncing);
}

#[test]
fn custom_window_is_respected() {
	let origin = Instant::now();
	let options = PipelineOptions::default().with_debounce(Duration::from_millis(50));
	let mut coalescer = coalescer_with(options);

	coalescer.on_term(Term::from("iq"), origin);
	assert!(coalescer.on_deadline(at(origin, 49)).is_none());
	assert!(coalescer.on_deadline(at(origin, 50)).is_some());
}
