use clap::ValueEnum;
use hero_search::MatchMode;

/// Match modes accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum MatchArg {
	Substring,
	Fuzzy,
}

impl MatchArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		self.mode().as_str()
	}

	fn mode(self) -> MatchMode {
		match self {
			MatchArg::Substring => MatchMode::Substring,
			MatchArg::Fuzzy => MatchMode::Fuzzy,
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
