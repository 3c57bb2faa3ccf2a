//! Prediction client.
//!
//! [`PredictionClient`] sends a symptom description to a remote prediction
//! service, or answers it in-process with the matcher when no service is
//! configured. Both paths share one contract:
//!
//! - empty input fails with [`PredictionError::Validation`] before any call
//! - transport failures and non-2xx statuses fail with [`PredictionError::Network`]
//! - malformed bodies fail with [`PredictionError::Decode`]
//! - success yields the complete ranked list, most likely first
//!
//! ## Wire Contract
//!
//! - `POST {base}/predict` with `{"text": "..."}` returns
//!   `{"predictions": [{"name", "probability", "severity", "description", "advice"}]}`
//! - `GET {base}/symptoms` returns `{"symptoms": ["...", ...]}`
//!
//! ## Example
//!
//! ```rust,no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use symptom_solver::client::{ClientConfig, PredictionClient};
//! use symptom_solver::ConditionCatalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ConditionCatalog::load_embedded()?);
//! let client = PredictionClient::from_config(&ClientConfig::from_env(), catalog)?;
//!
//! for disease in client.fetch_prediction("a dry cough and a fever").await? {
//!     println!("{} {:.0}%", disease.name, disease.probability * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod local;
pub mod remote;
pub mod wire;

use std::sync::Arc;
use std::time::Duration;

pub use error::{DecodeError, NetworkError, PredictionError};
pub use local::LocalPredictor;
pub use remote::{RemoteClient, API_URL_ENV, DEFAULT_API_URL};
pub use wire::{PredictRequest, PredictResponse, SymptomsResponse};

use crate::catalog::store::ConditionCatalog;
use crate::core::disease::Disease;
use crate::core::symptoms::SymptomSet;
use crate::matching::engine::MatchingConfig;
use crate::utils::validation::check_symptom_count;

/// How a [`PredictionClient`] is built
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Remote base URL; `None` selects the local matcher
    pub api_url: Option<String>,

    /// Per-request timeout for the remote client (none by default)
    pub timeout: Option<Duration>,

    /// Seed for the local matcher's generator
    pub seed: Option<u64>,

    /// Local matcher settings
    pub matching: MatchingConfig,
}

impl ClientConfig {
    /// Read the base URL from [`API_URL_ENV`], ignoring blank values
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var(API_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Use the remote service, falling back to [`DEFAULT_API_URL`]
    #[must_use]
    pub fn remote_or_default(mut self) -> Self {
        if self.api_url.is_none() {
            self.api_url = Some(DEFAULT_API_URL.to_string());
        }
        self
    }
}

/// A remote service or its in-process fallback behind one contract
pub enum PredictionClient {
    Remote(RemoteClient),
    Local(LocalPredictor),
}

impl PredictionClient {
    /// Build the remote client when a URL is configured, the local matcher otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(
        config: &ClientConfig,
        catalog: Arc<ConditionCatalog>,
    ) -> Result<Self, NetworkError> {
        if let Some(url) = &config.api_url {
            tracing::debug!(%url, "Using remote prediction service");
            return Ok(Self::Remote(RemoteClient::with_timeout(url, config.timeout)?));
        }

        tracing::debug!("No prediction service configured, using local matcher");
        let matching = config.matching.clone();
        Ok(Self::Local(match config.seed {
            Some(seed) => LocalPredictor::with_seed(catalog, matching, seed),
            None => LocalPredictor::new(catalog, matching),
        }))
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Predict conditions from a free-text description
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`]; see the module docs.
    pub async fn fetch_prediction(&self, text: &str) -> Result<Vec<Disease>, PredictionError> {
        Ok(self.fetch_prediction_response(text).await?.predictions)
    }

    /// Like [`fetch_prediction`](Self::fetch_prediction), keeping
    /// `symptoms_found` and `message`
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`]; see the module docs.
    pub async fn fetch_prediction_response(
        &self,
        text: &str,
    ) -> Result<PredictResponse, PredictionError> {
        match self {
            Self::Remote(client) => client.fetch_prediction_response(text).await,
            Self::Local(predictor) => predictor.predict_text(text),
        }
    }

    /// Predict conditions from explicit symptom labels.
    ///
    /// The remote contract only carries text, so labels are joined with `", "`.
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`]; see the module docs.
    pub async fn fetch_prediction_for(
        &self,
        symptoms: &SymptomSet,
    ) -> Result<Vec<Disease>, PredictionError> {
        check_symptom_count(symptoms.len())?;
        match self {
            Self::Remote(client) => client.fetch_prediction(&symptoms.to_text()).await,
            Self::Local(predictor) => predictor.predict_symptoms(symptoms),
        }
    }

    /// The recognized symptom vocabulary
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`] when the remote call fails.
    pub async fn fetch_symptoms(&self) -> Result<Vec<String>, PredictionError> {
        match self {
            Self::Remote(client) => client.fetch_symptoms().await,
            Self::Local(predictor) => Ok(predictor.symptoms()),
        }
    }
}
