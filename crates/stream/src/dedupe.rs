use crate::term::Term;

/// Drops a settled term when it equals the last term forwarded to dispatch.
#[derive(Debug, Default)]
pub struct Deduplicator {
	last_forwarded: Option<Term>,
}

impl Deduplicator {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `term` as forwarded unless it repeats the previous one.
	pub fn admit(&mut self, term: &Term) -> bool {
		if self.last_forwarded.as_ref() == Some(term) {
			return false;
		}
		self.last_forwarded = Some(term.clone());
		true
	}

	#[must_use]
	pub fn last_forwarded(&self) -> Option<&Term> {
		self.last_forwarded.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn repeated_term_is_dropped() {
		let mut dedupe = Deduplicator::new();
		assert!(dedupe.admit(&Term::from("bomb")));
		assert!(!dedupe.admit(&Term::from("bomb")));
		assert_eq!(dedupe.last_forwarded(), Some(&Term::from("bomb")));
	}

	#[test]
	fn only_the_immediately_preceding_term_counts() {
		let mut dedupe = Deduplicator::new();
		assert!(dedupe.admit(&Term::from("a")));
		assert!(dedupe.admit(&Term::from("b")));
		assert!(dedupe.admit(&Term::from("a")));
	}

	#[test]
	fn empty_term_is_admitted_once() {
		let mut dedupe = Deduplicator::new();
		assert!(dedupe.admit(&Term::from("")));
		assert!(!dedupe.admit(&Term::from("")));
	}
}
