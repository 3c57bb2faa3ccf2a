use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::ConditionCatalog;
use crate::cli::OutputFormat;
use crate::core::types::Severity;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all conditions in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Filter by severity (low, medium, high)
        #[arg(long)]
        severity: Option<Severity>,

        /// Only conditions listing this symptom
        #[arg(long)]
        symptom: Option<String>,
    },

    /// Show details of a specific condition
    Show {
        /// Condition name (e.g., "Common Cold")
        #[arg(required = true)]
        name: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the condition is not
/// found, or the export cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            severity,
            symptom,
        } => run_list(catalog, severity, symptom.as_deref(), format, verbose),
        CatalogCommands::Show { name, catalog } => run_show(&name, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(&output, catalog, verbose),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    severity: Option<Severity>,
    symptom: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;

    let conditions: Vec<_> = match symptom {
        Some(symptom) => catalog.conditions_with_symptom(symptom).collect(),
        None => catalog.conditions.iter().collect(),
    };
    let conditions: Vec<_> = conditions
        .into_iter()
        .filter(|c| severity.map_or(true, |s| c.severity == s))
        .collect();

    if verbose {
        eprintln!(
            "Catalog has {} conditions over {} symptoms",
            catalog.len(),
            catalog.symptoms().len()
        );
    }

    match format {
        OutputFormat::Text => {
            println!("Conditions in catalog:\n");
            println!("{:<20} {:<8} {:>8}", "Name", "Severity", "Symptoms");
            println!("{}", "-".repeat(38));

            for c in &conditions {
                println!("{:<20} {:<8} {:>8}", c.name, c.severity, c.symptom_count());
            }

            println!("\nTotal: {} conditions", conditions.len());
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = conditions
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "name": c.name,
                        "severity": c.severity,
                        "symptoms": c.symptoms,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("name\tseverity\tsymptom_count\tsymptoms");
            for c in &conditions {
                println!(
                    "{}\t{}\t{}\t{}",
                    c.name,
                    c.severity,
                    c.symptom_count(),
                    c.symptoms.join(",")
                );
            }
        }
    }

    Ok(())
}

fn run_show(name: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;

    let condition = catalog
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Condition not found: {name}"))?;

    match format {
        OutputFormat::Text => {
            println!("Name:        {}", condition.name);
            println!("Severity:    {}", condition.severity);
            println!("Description: {}", condition.description);
            if let Some(advice) = &condition.advice {
                println!("Advice:      {advice}");
            }
            println!("\nSymptoms ({}):", condition.symptom_count());
            for symptom in &condition.symptoms {
                println!("  - {symptom}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(condition)?);
        }
        OutputFormat::Tsv => {
            println!("symptom");
            for symptom in &condition.symptoms {
                println!("{symptom}");
            }
        }
    }

    Ok(())
}

fn run_export(
    output: &std::path::Path,
    catalog_path: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    if verbose {
        eprintln!(
            "Exported {} conditions to {}",
            catalog.len(),
            output.display()
        );
    }

    Ok(())
}
