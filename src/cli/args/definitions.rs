use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::{MatchArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `hero-search` binary.
#[derive(Parser, Debug)]
#[command(
	name = "hero-search",
	version,
	long_version = long_version(),
	about = "Debounced incremental search over a hero roster, one term per stdin line",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "HERO_SEARCH_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'd',
		long = "debounce-ms",
		value_name = "MS",
		help = "Quiet period before a term is searched (default: 300)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "skip-blank",
		value_name = "BOOL",
		num_args = 0..=1,
		default_missing_value = "true",
		value_parser = BoolishValueParser::new(),
		help = "Drop blank terms instead of searching for them (default: disabled)"
	)]
	pub(crate) skip_blank: Option<bool>,
	#[arg(
		long,
		value_name = "BOOL",
		num_args = 0..=1,
		default_missing_value = "true",
		value_parser = BoolishValueParser::new(),
		help = "Trim surrounding whitespace from terms (default: disabled)"
	)]
	pub(crate) trim: Option<bool>,
	#[arg(
		short = 'i',
		long = "case-insensitive",
		value_name = "BOOL",
		num_args = 0..=1,
		default_missing_value = "true",
		value_parser = BoolishValueParser::new(),
		help = "Lowercase terms before deduplication (default: disabled)"
	)]
	pub(crate) case_insensitive: Option<bool>,
	#[arg(
		long = "latency-ms",
		value_name = "MS",
		help = "Simulated backend latency per query (default: 0)"
	)]
	pub(crate) latency_ms: Option<u64>,
	#[arg(
		short = 'm',
		long = "match",
		value_enum,
		help = "Choose how terms are matched against names (default: substring)"
	)]
	pub(crate) match_mode: Option<MatchArg>,
	#[arg(
		long = "fail-on",
		value_name = "TERM",
		action = ArgAction::Append,
		help = "Make the backend refuse TERM; repeatable (default: none)"
	)]
	pub(crate) fail_on: Vec<String>,
	#[arg(
		long = "heroes",
		value_name = "FILE",
		help = "JSON roster to search instead of the built-in heroes"
	)]
	pub(crate) heroes: Option<PathBuf>,
	#[arg(
		short = 'l',
		long = "list-heroes",
		help = "Print the roster and exit (default: disabled)"
	)]
	pub(crate) list_heroes: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print results"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'k',
		long = "keystroke-ms",
		value_name = "MS",
		help = "Replay each line one character at a time, MS apart (default: submit whole lines)"
	)]
	pub(crate) keystroke_ms: Option<u64>,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Increase log verbosity; repeat for more (default: warnings only)"
	)]
	pub(crate) verbose: u8,
}
