//! Command-line interface for symptom-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **predict**: Rank likely conditions for a symptom description
//! - **symptoms**: List the recognized symptom vocabulary
//! - **catalog**: List, show, or export conditions from the catalog
//! - **serve**: Start the prediction service
//!
//! ## Usage
//!
//! ```text
//! # Predict locally from a description
//! symptom-solver predict "dry cough, fever and chills"
//!
//! # Explicit symptoms, reproducible output
//! symptom-solver predict -s Cough -s Congestion,"Runny Nose" --seed 7
//!
//! # Ask a running prediction service instead
//! symptom-solver predict "headache and nausea" --api-url http://localhost:8000/api
//!
//! # JSON output for scripting
//! echo "sore throat" | symptom-solver predict - --format json
//!
//! # Start the service
//! symptom-solver serve --port 8000
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::catalog::store::ConditionCatalog;
use crate::client::{ClientConfig, PredictionClient};
use crate::matching::engine::{MatchingConfig, DEFAULT_LIMIT};

pub mod catalog;
pub mod predict;
pub mod symptoms;

#[derive(Parser)]
#[command(name = "symptom-solver")]
#[command(version)]
#[command(about = "Rank likely conditions from reported symptoms")]
#[command(
    long_about = "symptom-solver matches reported symptoms against a catalog of known conditions and returns the most likely ones with a probability and severity.\n\nPredictions come from a remote prediction service when one is configured (--api-url or SYMPTOM_SOLVER_API_URL), or from the built-in matcher otherwise.\n\nThe built-in heuristic is a placeholder and has no clinical meaning."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict likely conditions from symptoms
    Predict(predict::PredictArgs),

    /// List the recognized symptoms
    Symptoms(symptoms::SymptomsArgs),

    /// Inspect the condition catalog
    Catalog(catalog::CatalogArgs),

    /// Start the prediction service
    Serve(ServeArgs),
}

/// Where predictions come from
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Base URL of a prediction service (e.g. http://localhost:8000/api)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Use the prediction service even if no URL is configured
    /// (falls back to http://localhost:8000/api)
    #[arg(long)]
    pub remote: bool,

    /// Request timeout in seconds for the prediction service
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to custom catalog file for local predictions
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

impl SourceArgs {
    /// Resolve the client configuration: flag, then environment, then local
    #[must_use]
    pub fn client_config(&self, matching: MatchingConfig, seed: Option<u64>) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config.api_url = Some(url.clone());
        }
        if self.remote {
            config = config.remote_or_default();
        }
        config.timeout = self.timeout.map(Duration::from_secs);
        config.seed = seed;
        config.matching = matching;
        config
    }

    /// Build the client, loading the catalog only for local predictions
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the HTTP client
    /// cannot be initialized.
    pub fn build_client(
        &self,
        matching: MatchingConfig,
        seed: Option<u64>,
    ) -> anyhow::Result<PredictionClient> {
        let config = self.client_config(matching, seed);
        let catalog = if config.api_url.is_some() {
            ConditionCatalog::new()
        } else {
            ConditionCatalog::load(self.catalog.as_deref())?
        };
        Ok(PredictionClient::from_config(&config, Arc::new(catalog))?)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Number of conditions returned per prediction
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    pub max_results: usize,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
