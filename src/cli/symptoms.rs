use anyhow::Context;
use clap::Args;

use crate::cli::{OutputFormat, SourceArgs};
use crate::client::wire::SymptomsResponse;
use crate::matching::engine::MatchingConfig;

#[derive(Args)]
pub struct SymptomsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Execute symptoms subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the remote call fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SymptomsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let client = args.source.build_client(MatchingConfig::default(), None)?;
        let symptoms = client
            .fetch_symptoms()
            .await
            .context("Failed to fetch the symptom list")?;

        if verbose {
            eprintln!("{} recognized symptoms", symptoms.len());
        }

        match format {
            OutputFormat::Text | OutputFormat::Tsv => {
                for symptom in &symptoms {
                    println!("{symptom}");
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&SymptomsResponse { symptoms })?
                );
            }
        }

        Ok(())
    })
}
