use serde::{Deserialize, Serialize};

use crate::core::condition::ConditionProfile;
use crate::core::types::Severity;

/// A ranked candidate condition returned by a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub name: String,

    /// Probability in [0, 1]
    pub probability: f64,

    pub severity: Severity,

    pub description: String,

    #[serde(default)]
    pub advice: Option<String>,
}

impl Disease {
    /// Build a prediction record from a reference profile.
    ///
    /// The probability is clamped into [0, 1]; a NaN becomes 0.
    #[must_use]
    pub fn from_profile(profile: &ConditionProfile, probability: f64) -> Self {
        Self {
            name: profile.name.clone(),
            probability: clamp_probability(probability),
            severity: profile.severity,
            description: profile.description.clone(),
            advice: profile.advice.clone(),
        }
    }

    /// Probability as a whole percentage, for display
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.probability * 100.0).round()
    }
}

pub(crate) fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}
