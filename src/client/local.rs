use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::store::ConditionCatalog;
use crate::client::error::PredictionError;
use crate::client::wire::{PredictResponse, NO_SYMPTOMS_MESSAGE};
use crate::core::disease::Disease;
use crate::core::symptoms::SymptomSet;
use crate::matching::engine::{MatchResult, MatchingConfig, Matcher};
use crate::parsing::text::extract_symptoms;
use crate::utils::validation::{check_symptom_count, validate_symptom_text};

/// Locate vocabulary symptoms in `text` and score the catalog against them.
///
/// No generator value is drawn when nothing is recognized.
pub fn match_text<'a, R: Rng>(
    catalog: &'a ConditionCatalog,
    config: &MatchingConfig,
    text: &str,
    rng: &mut R,
) -> (SymptomSet, Vec<MatchResult<'a>>) {
    let symptoms = extract_symptoms(text, catalog.symptoms());
    let matches = Matcher::with_config(catalog, config.clone()).find_matches(&symptoms, rng);
    (symptoms, matches)
}

fn build_response(symptoms: &SymptomSet, matches: &[MatchResult<'_>]) -> PredictResponse {
    if symptoms.is_empty() {
        return PredictResponse {
            predictions: Vec::new(),
            symptoms_found: Vec::new(),
            message: Some(NO_SYMPTOMS_MESSAGE.to_string()),
        };
    }

    PredictResponse {
        predictions: matches.iter().map(MatchResult::to_disease).collect(),
        symptoms_found: symptoms.labels().map(str::to_string).collect(),
        message: None,
    }
}

/// Answer a free-text prediction request against a catalog.
///
/// When no symptom is recognized the predictions are empty and `message`
/// says so. `text` must already be validated.
pub fn predict_from_text<R: Rng>(
    catalog: &ConditionCatalog,
    config: &MatchingConfig,
    text: &str,
    rng: &mut R,
) -> PredictResponse {
    let (symptoms, matches) = match_text(catalog, config, text, rng);
    build_response(&symptoms, &matches)
}

/// In-process stand-in for the prediction service, backed by the matcher
pub struct LocalPredictor {
    catalog: Arc<ConditionCatalog>,
    config: MatchingConfig,
    rng: Mutex<StdRng>,
}

impl LocalPredictor {
    /// Create a predictor seeded from the OS
    #[must_use]
    pub fn new(catalog: Arc<ConditionCatalog>, config: MatchingConfig) -> Self {
        Self::with_rng(catalog, config, StdRng::from_os_rng())
    }

    /// Create a predictor with a fixed seed, for reproducible output
    #[must_use]
    pub fn with_seed(catalog: Arc<ConditionCatalog>, config: MatchingConfig, seed: u64) -> Self {
        Self::with_rng(catalog, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<ConditionCatalog>, config: MatchingConfig, rng: StdRng) -> Self {
        Self {
            catalog,
            config,
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ConditionCatalog {
        &self.catalog
    }

    /// Free-text prediction with the full response
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Validation` for empty or oversized text.
    pub fn predict_text(&self, text: &str) -> Result<PredictResponse, PredictionError> {
        Ok(self.explain_text(text)?.0)
    }

    /// Like [`predict_text`](Self::predict_text), also returning the score
    /// breakdown of each prediction, in the same order
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Validation` for empty or oversized text.
    pub fn explain_text(
        &self,
        text: &str,
    ) -> Result<(PredictResponse, Vec<MatchResult<'_>>), PredictionError> {
        let text = validate_symptom_text(text)?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let (symptoms, matches) = match_text(&self.catalog, &self.config, text, &mut *rng);
        Ok((build_response(&symptoms, &matches), matches))
    }

    /// Free-text prediction
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Validation` for empty or oversized text.
    pub fn fetch_prediction(&self, text: &str) -> Result<Vec<Disease>, PredictionError> {
        Ok(self.predict_text(text)?.predictions)
    }

    /// Prediction from explicit symptom labels
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Validation` for an empty or oversized set.
    pub fn predict_symptoms(&self, symptoms: &SymptomSet) -> Result<Vec<Disease>, PredictionError> {
        Ok(self
            .explain_symptoms(symptoms)?
            .iter()
            .map(MatchResult::to_disease)
            .collect())
    }

    /// Score breakdown for explicit symptom labels, most likely first
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Validation` for an empty or oversized set.
    pub fn explain_symptoms(
        &self,
        symptoms: &SymptomSet,
    ) -> Result<Vec<MatchResult<'_>>, PredictionError> {
        check_symptom_count(symptoms.len())?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Matcher::with_config(&self.catalog, self.config.clone()).find_matches(symptoms, &mut *rng))
    }

    /// The catalog's symptom vocabulary
    #[must_use]
    pub fn symptoms(&self) -> Vec<String> {
        self.catalog.symptoms().to_vec()
    }
}
