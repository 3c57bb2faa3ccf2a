use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::condition::ConditionProfile;
use crate::core::disease::clamp_probability;
use crate::core::symptoms::SymptomSet;

/// Convert usize to f64 for rate calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Default lower bound of the zero-match baseline
pub const DEFAULT_BASELINE_MIN: f64 = 0.05;
/// Default upper bound of the zero-match baseline
pub const DEFAULT_BASELINE_MAX: f64 = 0.15;
/// Default lower bound of the noise factor
pub const DEFAULT_NOISE_MIN: f64 = 0.7;
/// Default upper bound of the noise factor
pub const DEFAULT_NOISE_MAX: f64 = 1.0;
/// Default cap on a matched condition's probability
pub const DEFAULT_CEILING: f64 = 0.95;

/// Constants of the placeholder probability heuristic.
///
/// A condition with no matching symptom gets a probability drawn from
/// `[baseline_min, baseline_max]`. Otherwise its probability is
/// `min(ceiling, match_rate * noise)` with `noise` drawn from
/// `[noise_min, noise_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityModel {
    pub baseline_min: f64,
    pub baseline_max: f64,
    pub noise_min: f64,
    pub noise_max: f64,
    pub ceiling: f64,
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self {
            baseline_min: DEFAULT_BASELINE_MIN,
            baseline_max: DEFAULT_BASELINE_MAX,
            noise_min: DEFAULT_NOISE_MIN,
            noise_max: DEFAULT_NOISE_MAX,
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl ProbabilityModel {
    /// Clamp every bound into [0, 1] and order each range low-to-high.
    ///
    /// Non-finite values fall back to the defaults.
    #[must_use]
    pub fn validated(&self) -> Self {
        let defaults = Self::default();
        let unit = |value: f64, fallback: f64| {
            if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        let ordered = |a: f64, b: f64| if a <= b { (a, b) } else { (b, a) };

        let (baseline_min, baseline_max) = ordered(
            unit(self.baseline_min, defaults.baseline_min),
            unit(self.baseline_max, defaults.baseline_max),
        );
        let (noise_min, noise_max) = ordered(
            unit(self.noise_min, defaults.noise_min),
            unit(self.noise_max, defaults.noise_max),
        );

        Self {
            baseline_min,
            baseline_max,
            noise_min,
            noise_max,
            ceiling: unit(self.ceiling, defaults.ceiling),
        }
    }
}

/// Score breakdown for one condition
#[derive(Debug, Clone)]
pub struct ConditionScore {
    /// `|reported ∩ known|`
    pub match_count: usize,

    /// `match_count / |known|`
    pub match_rate: f64,

    /// Final probability in [0, 1]
    pub probability: f64,
}

impl ConditionScore {
    /// Score a condition against reported symptoms.
    ///
    /// Draws exactly one value from `rng`. The model must already be
    /// [validated](ProbabilityModel::validated).
    pub fn calculate<R: Rng>(
        reported: &SymptomSet,
        profile: &ConditionProfile,
        model: &ProbabilityModel,
        rng: &mut R,
    ) -> Self {
        let match_count = profile.match_count(reported);
        let known = profile.symptom_count();
        debug_assert!(known > 0, "condition '{}' has no symptoms", profile.name);

        let match_rate = if known == 0 {
            0.0
        } else {
            count_to_f64(match_count) / count_to_f64(known)
        };

        let probability = if match_count == 0 {
            rng.random_range(model.baseline_min..=model.baseline_max)
        } else {
            let noise = rng.random_range(model.noise_min..=model.noise_max);
            (match_rate * noise).min(model.ceiling)
        };

        Self {
            match_count,
            match_rate,
            probability: clamp_probability(probability),
        }
    }
}
