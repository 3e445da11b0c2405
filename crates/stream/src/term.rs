use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// One user-submitted search string.
///
/// Terms have no identity beyond their text. Cloning is cheap because the
/// text is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(Arc<str>);

impl Term {
	/// Create a term from any string-like value.
	#[must_use]
	pub fn new(text: impl AsRef<str>) -> Self {
		Self(Arc::from(text.as_ref()))
	}

	/// Borrow the raw text of the term.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Whether the term is empty or consists only of whitespace.
	#[must_use]
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl Deref for Term {
	type Target = str;

	fn deref(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Term {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Term {
	fn from(text: &str) -> Self {
		Self(Arc::from(text))
	}
}

impl From<String> for Term {
	fn from(text: String) -> Self {
		Self(Arc::from(text))
	}
}

impl From<&String> for Term {
	fn from(text: &String) -> Self {
		Self::new(text)
	}
}

impl fmt::Debug for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Rewrites applied to a term as it enters the pipeline.
///
/// Both rewrites are disabled by default so equality stays exact text
/// equality. Everything downstream of admission, dedupe and the query itself
/// included, sees the normalized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalization {
	/// Strip leading and trailing whitespace.
	pub trim: bool,
	/// Fold the term to lowercase.
	pub case_insensitive: bool,
}

impl Normalization {
	/// Normalization that leaves every term untouched.
	pub const EXACT: Self = Self {
		trim: false,
		case_insensitive: false,
	};

	/// Apply the configured rewrites, reusing the original allocation when
	/// nothing changes.
	#[must_use]
	pub fn apply(&self, term: Term) -> Term {
		if !self.trim && !self.case_insensitive {
			return term;
		}

		let text = if self.trim {
			term.as_str().trim()
		} else {
			term.as_str()
		};
		let normalized = if self.case_insensitive {
			text.to_lowercase()
		} else {
			text.to_string()
		};

		if normalized == term.as_str() {
			term
		} else {
			Term::from(normalized)
		}
	}
}
