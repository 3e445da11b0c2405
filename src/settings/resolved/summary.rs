use hero_search::BlankTerms;

use super::ResolvedConfig;

pub(super) fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	let pipeline = &config.pipeline;
	let mut lines = vec![
		"Effective configuration:".to_string(),
		format!("  Debounce: {}ms", pipeline.debounce.as_millis()),
		format!(
			"  Skip blank terms: {}",
			bool_to_word(pipeline.blank_terms == BlankTerms::Skip)
		),
		format!("  Trim terms: {}", bool_to_word(pipeline.normalization.trim)),
		format!(
			"  Case-insensitive: {}",
			bool_to_word(pipeline.normalization.case_insensitive)
		),
		format!("  Backend latency: {}ms", config.latency.as_millis()),
		format!("  Match mode: {}", config.match_mode.as_str()),
	];
	if config.fail_terms.is_empty() {
		lines.push("  Failing terms: (none)".to_string());
	} else {
		lines.push(format!("  Failing terms: {}", config.fail_terms.join(", ")));
	}
	match &config.heroes_file {
		Some(path) => lines.push(format!("  Heroes file: {}", path.display())),
		None => lines.push("  Heroes file: (built-in roster)".to_string()),
	}
	lines
}

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
