use std::fs;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use hero_search::heroes::{mock_heroes, parse_roster};
use hero_search::{Hero, HeroSearchService, HeroStore, MessageLog, SearchPipeline, TermInput};

use crate::cli::{OutputFormat, write_result};
use crate::settings::ResolvedConfig;

/// Slack added on top of debounce and latency when waiting for the last result.
const IDLE_GRACE: Duration = Duration::from_secs(30);

/// How stdin lines are turned into submitted terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Replay {
	/// Submit every line as one term, as fast as it is read.
	Lines,
	/// Submit every prefix of a line, `Duration` apart, then wait for its result.
	Keystrokes(Duration),
}

impl Replay {
	pub(crate) fn from_keystroke_ms(keystroke_ms: Option<u64>) -> Self {
		keystroke_ms.map_or(Replay::Lines, |ms| Replay::Keystrokes(Duration::from_millis(ms)))
	}
}

/// Coordinates the hero store, the search pipeline and result printing.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
	store: HeroStore,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let heroes = load_roster(&config)?;
		let store = HeroStore::new(heroes, MessageLog::new());
		Ok(Self { config, store })
	}

	pub(crate) fn store(&self) -> &HeroStore {
		&self.store
	}

	/// Feed `input` through the pipeline, writing each emitted result to `out`.
	///
	/// Returns the number of results written.
	pub(crate) fn run<R, W>(
		self,
		input: R,
		out: W,
		format: OutputFormat,
		replay: Replay,
	) -> Result<usize>
	where
		R: BufRead,
		W: Write + Send + 'static,
	{
		let Self { config, store } = self;
		let messages = store.messages().clone();
		let service = config.fail_terms.iter().fold(
			HeroSearchService::new(store)
				.with_mode(config.match_mode)
				.with_latency(config.latency),
			|service, term| service.failing_on(term.as_str()),
		);

		let idle_timeout = config.pipeline.debounce + config.latency + IDLE_GRACE;
		let (terms, stream) = TermInput::channel();
		let pipeline = SearchPipeline::builder(service)
			.options(config.pipeline)
			.reporter(messages)
			.spawn(stream);
		let subscription = pipeline.subscribe();

		let printer = thread::spawn(move || -> Result<usize> {
			let mut out = out;
			let mut written = 0;
			for result in subscription {
				write_result(&mut out, format, &result)?;
				written += 1;
			}
			Ok(written)
		});

		for line in input.lines() {
			let line = line.context("failed to read search terms")?;
			match replay {
				Replay::Lines => terms.submit(line),
				Replay::Keystrokes(delay) => {
					for prefix in keystrokes(&line) {
						terms.submit(prefix);
						thread::sleep(delay);
					}
					wait_for(&pipeline, idle_timeout);
				}
			}
		}

		wait_for(&pipeline, idle_timeout);
		pipeline.shutdown();

		printer
			.join()
			.map_err(|_| anyhow!("result printer panicked"))?
	}
}

fn wait_for(pipeline: &SearchPipeline<HeroSearchService>, timeout: Duration) {
	if !pipeline.wait_idle(timeout) {
		log::warn!(
			"search pipeline still busy after {}ms; continuing",
			timeout.as_millis()
		);
	}
}

fn load_roster(config: &ResolvedConfig) -> Result<Vec<Hero>> {
	let Some(path) = &config.heroes_file else {
		return Ok(mock_heroes());
	};
	let json = fs::read_to_string(path)
		.with_context(|| format!("failed to read hero roster {}", path.display()))?;
	let heroes = parse_roster(&json)
		.with_context(|| format!("failed to load hero roster {}", path.display()))?;
	log::info!("loaded {} heroes from {}", heroes.len(), path.display());
	Ok(heroes)
}

/// Every prefix of `line`, as a user typing it would produce them.
pub(crate) fn keystrokes(line: &str) -> Vec<String> {
	if line.is_empty() {
		return vec![String::new()];
	}
	line.char_indices()
		.map(|(start, ch)| line[..start + ch.len_utf8()].to_string())
		.collect()
}
