use std::io::Write;

use anyhow::Result;
use hero_search::{Hero, QueryResult};
use serde_json::json;

use super::OutputFormat;

/// Format one emitted result as a single line of plain text.
pub(crate) fn format_plain(result: &QueryResult<Hero>) -> String {
	if result.failed {
		return format!("\"{}\": search failed", result.term);
	}
	if result.is_empty() {
		return format!("\"{}\": no heroes", result.term);
	}

	let names: Vec<&str> = result
		.records()
		.iter()
		.map(|hero| hero.name.as_str())
		.collect();
	format!("\"{}\": {}", result.term, names.join(", "))
}

/// Format one emitted result as a compact JSON object.
pub(crate) fn format_json(result: &QueryResult<Hero>) -> Result<String> {
	let payload = json!({
		"term": result.term.as_str(),
		"generation": result.generation,
		"failed": result.failed,
		"heroes": result.records(),
	});

	Ok(serde_json::to_string(&payload)?)
}

/// Write one emitted result followed by a newline.
pub(crate) fn write_result(
	out: &mut dyn Write,
	format: OutputFormat,
	result: &QueryResult<Hero>,
) -> Result<()> {
	let line = match format {
		OutputFormat::Plain => format_plain(result),
		OutputFormat::Json => format_json(result)?,
	};
	writeln!(out, "{line}")?;
	out.flush()?;
	Ok(())
}

/// Print the roster, one hero per line or as a JSON array.
pub(crate) fn print_heroes(format: OutputFormat, heroes: &[Hero]) -> Result<()> {
	match format {
		OutputFormat::Plain => {
			for hero in heroes {
				println!("{:>4}  {}", hero.id, hero.name);
			}
		}
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(heroes)?),
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use hero_search::Term;
	use serde_json::Value;

	use super::*;

	fn result(term: &str, heroes: Vec<Hero>, failed: bool) -> QueryResult<Hero> {
		QueryResult {
			term: Term::new(term),
			records: Arc::from(heroes),
			generation: 3,
			failed,
		}
	}

	#[test]
	fn plain_format_lists_names() {
		let hits = result(
			"ma",
			vec![Hero::new(15, "Magneta"), Hero::new(19, "Magma")],
			false,
		);
		assert_eq!(format_plain(&hits), "\"ma\": Magneta, Magma");
		assert_eq!(format_plain(&result("zz", Vec::new(), false)), "\"zz\": no heroes");
		assert_eq!(
			format_plain(&result("iq", Vec::new(), true)),
			"\"iq\": search failed"
		);
	}

	#[test]
	fn json_format_includes_heroes() {
		let hits = result("dr", vec![Hero::new(18, "Dr. IQ")], false);
		let json = format_json(&hits).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["term"], "dr");
		assert_eq!(value["generation"], 3);
		assert_eq!(value["failed"], false);
		assert_eq!(value["heroes"][0]["id"], 18);
		assert_eq!(value["heroes"][0]["name"], "Dr. IQ");
	}

	#[test]
	fn results_are_written_line_by_line() {
		let mut out = Vec::new();
		write_result(&mut out, OutputFormat::Plain, &result("a", Vec::new(), false))
			.expect("write");
		write_result(&mut out, OutputFormat::Json, &result("b", Vec::new(), false))
			.expect("write");
		let text = String::from_utf8(out).expect("utf8");
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0], "\"a\": no heroes");
		assert!(lines[1].starts_with('{'));
	}
}
