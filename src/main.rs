mod cli;
mod settings;
mod workflow;

use std::io;

use anyhow::Result;
use cli::{CliArgs, parse_cli, print_heroes};
use hero_search::logging;
use workflow::{Replay, SearchWorkflow};

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = SearchWorkflow::from_config(resolved)?;

	if cli.list_heroes {
		return print_heroes(cli.output, &workflow.store().heroes());
	}

	run_search(&cli, workflow)
}

/// Search every stdin line and print results in the chosen format.
fn run_search(cli: &CliArgs, workflow: SearchWorkflow) -> Result<()> {
	let replay = Replay::from_keystroke_ms(cli.keystroke_ms);
	let emitted = workflow.run(io::stdin().lock(), io::stdout(), cli.output, replay)?;
	log::info!("printed {emitted} result(s)");
	Ok(())
}
