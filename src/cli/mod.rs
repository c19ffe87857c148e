//! Command line interface for the framework embedder.
//!
//! Parses arguments, collects interface sources, runs the [`Embedder`] and
//! reports the outcome.

mod args;

pub use args::Args;

use crate::bundler::{EmbedConfig, Embedder};
use crate::error::{CliError, Result};
use crate::source::collect_interface_sources;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs one embedding for already-parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let sources = collect_interface_sources(&args.sources)?;
    if sources.is_empty() {
        return Err(CliError::InvalidArguments {
            reason: "no .swift sources found in the given paths".to_string(),
        }
        .into());
    }

    let embedder = Embedder::new(EmbedConfig::from(args));
    let output = embedder.embed(&args.framework, &sources).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let verb = if output.dry_run { "Would embed" } else { "Embedded" };
        println!(
            "{} {} source file(s) into {} ({})",
            verb,
            output.sources_embedded,
            output.bundle_name,
            output.binary_path.display()
        );
    }

    Ok(0)
}
