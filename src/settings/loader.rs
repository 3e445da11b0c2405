use anyhow::{Context, Result};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::{ENV_PREFIX, build_config};
use crate::cli::CliArgs;

/// Merge the configuration layers selected by `cli` and resolve them.
///
/// Errors name every layer that took part, lowest precedence first.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let layers = layer_names(cli).join(", ");
	log::debug!("loading configuration from {layers}");

	let merged = build_config(cli)
		.with_context(|| format!("failed to merge configuration layers ({layers})"))?;
	let mut raw: RawConfig = merged.try_deserialize().with_context(|| {
		format!("configuration from {layers} does not match the [search]/[service] layout")
	})?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

/// Human readable names of the layers `cli` selects, in merge order.
fn layer_names(cli: &CliArgs) -> Vec<String> {
	let mut layers = Vec::new();
	if !cli.no_config {
		layers.push("default config files".to_string());
	}
	layers.extend(cli.config.iter().map(|path| path.display().to_string()));
	layers.push(format!("{ENV_PREFIX}__* environment"));
	layers.push("command line".to_string());
	layers
}
