//! Logger setup for the `hero-search` binary.
//!
//! Library code only talks to the `log` facade; this module installs
//! `env_logger` as the backend.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable that overrides the verbosity flags.
pub const LOG_ENV: &str = "RUST_LOG";

/// Map the number of `-v` flags to a level filter.
#[must_use]
pub fn level_for(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the global logger, writing to stderr.
///
/// `RUST_LOG` wins over `verbosity` when set. Calling this twice is harmless.
pub fn initialize(verbosity: u8) {
	let default_filter = level_for(verbosity).to_string().to_ascii_lowercase();
	let env = Env::default().filter_or(LOG_ENV, default_filter);
	if Builder::from_env(env)
		.format_timestamp_millis()
		.try_init()
		.is_err()
	{
		log::debug!("logger already initialized");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_raises_the_level() {
		assert_eq!(level_for(0), LevelFilter::Warn);
		assert_eq!(level_for(1), LevelFilter::Info);
		assert_eq!(level_for(2), LevelFilter::Debug);
		assert_eq!(level_for(7), LevelFilter::Trace);
	}

	#[test]
	fn repeated_initialization_is_harmless() {
		initialize(0);
		initialize(3);
	}
}
