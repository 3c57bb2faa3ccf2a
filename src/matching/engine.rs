use rand::Rng;

use crate::catalog::store::ConditionCatalog;
use crate::core::condition::ConditionProfile;
use crate::core::disease::Disease;
use crate::core::symptoms::SymptomSet;
use crate::matching::scoring::{ConditionScore, ProbabilityModel};

/// Default number of conditions returned by a prediction
pub const DEFAULT_LIMIT: usize = 3;

/// Result of scoring one condition against the reported symptoms
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    /// The scored reference condition
    pub condition: &'a ConditionProfile,

    /// Score details
    pub score: ConditionScore,

    /// Reference symptoms that were reported
    pub matched_symptoms: Vec<String>,
}

impl MatchResult<'_> {
    /// Convert into the output record
    #[must_use]
    pub fn to_disease(&self) -> Disease {
        Disease::from_profile(self.condition, self.score.probability)
    }
}

/// Configuration for the matcher
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Maximum number of conditions returned
    pub limit: usize,
    /// Heuristic constants
    pub model: ProbabilityModel,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            model: ProbabilityModel::default(),
        }
    }
}

impl MatchingConfig {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Score every condition in `reference`, rank by descending probability and
/// keep the top `config.limit`.
///
/// Ties keep the order of `reference`. An empty symptom set scores nothing.
/// One value is drawn from `rng` per condition, in table order, so a seeded
/// generator gives a deterministic result.
pub fn score_conditions<'a, R: Rng>(
    symptoms: &SymptomSet,
    reference: &'a [ConditionProfile],
    config: &MatchingConfig,
    rng: &mut R,
) -> Vec<MatchResult<'a>> {
    if symptoms.is_empty() || config.limit == 0 {
        return Vec::new();
    }

    let model = config.model.validated();

    let mut results: Vec<MatchResult<'a>> = reference
        .iter()
        .map(|condition| MatchResult {
            condition,
            score: ConditionScore::calculate(symptoms, condition, &model, rng),
            matched_symptoms: condition.matched_symptoms(symptoms),
        })
        .collect();

    // Stable sort keeps table order on ties
    results.sort_by(|a, b| {
        b.score
            .probability
            .partial_cmp(&a.score.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results.truncate(config.limit);
    results
}

/// Predict the most likely conditions for `symptoms`.
pub fn predict<R: Rng>(
    symptoms: &SymptomSet,
    reference: &[ConditionProfile],
    config: &MatchingConfig,
    rng: &mut R,
) -> Vec<Disease> {
    score_conditions(symptoms, reference, config, rng)
        .iter()
        .map(MatchResult::to_disease)
        .collect()
}

/// Matcher bound to a catalog
pub struct Matcher<'a> {
    catalog: &'a ConditionCatalog,
    config: MatchingConfig,
}

impl<'a> Matcher<'a> {
    /// Create a matcher with default configuration
    #[must_use]
    pub fn new(catalog: &'a ConditionCatalog) -> Self {
        Self {
            catalog,
            config: MatchingConfig::default(),
        }
    }

    /// Create a matcher with custom configuration
    #[must_use]
    pub fn with_config(catalog: &'a ConditionCatalog, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank the catalog's conditions against `symptoms`
    pub fn predict<R: Rng>(&self, symptoms: &SymptomSet, rng: &mut R) -> Vec<Disease> {
        predict(symptoms, &self.catalog.conditions, &self.config, rng)
    }

    /// Like [`predict`](Self::predict) but keeps the score breakdown
    pub fn find_matches<R: Rng>(&self, symptoms: &SymptomSet, rng: &mut R) -> Vec<MatchResult<'a>> {
        let results = score_conditions(symptoms, &self.catalog.conditions, &self.config, rng);
        tracing::debug!(
            symptoms = symptoms.len(),
            results = results.len(),
            "Scored conditions"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Severity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_test_catalog() -> ConditionCatalog {
        ConditionCatalog::load_embedded().unwrap()
    }

    fn random_symptoms(catalog: &ConditionCatalog, rng: &mut StdRng) -> SymptomSet {
        catalog
            .symptoms()
            .iter()
            .filter(|_| rng.random_bool(0.25))
            .collect()
    }

    #[test]
    fn test_probabilities_bounded_for_random_inputs() {
        let catalog = make_test_catalog();
        let matcher = Matcher::new(&catalog);

        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let symptoms = random_symptoms(&catalog, &mut rng);
            for disease in matcher.predict(&symptoms, &mut rng) {
                assert!(
                    (0.0..=1.0).contains(&disease.probability),
                    "seed {seed}: {} has probability {}",
                    disease.name,
                    disease.probability
                );
            }
        }
    }

    #[test]
    fn test_output_capped_and_sorted() {
        let catalog = make_test_catalog();

        for limit in [1, 2, 3, 5, 10] {
            let matcher = Matcher::with_config(&catalog, MatchingConfig::default().with_limit(limit));
            for seed in 0..100 {
                let mut rng = StdRng::seed_from_u64(seed);
                let symptoms = random_symptoms(&catalog, &mut rng);
                let diseases = matcher.predict(&symptoms, &mut rng);

                assert!(diseases.len() <= limit);
                if !symptoms.is_empty() {
                    assert_eq!(diseases.len(), limit.min(catalog.len()));
                }
                assert!(diseases
                    .windows(2)
                    .all(|w| w[0].probability >= w[1].probability));
            }
        }
    }

    fn random_reference(rng: &mut StdRng, pool: &[&str]) -> Vec<ConditionProfile> {
        let severities = [Severity::Low, Severity::Medium, Severity::High];
        (0..rng.random_range(1..=12))
            .map(|i| {
                let symptoms: Vec<&str> = (0..rng.random_range(1..=6))
                    .map(|_| pool[rng.random_range(0..pool.len())])
                    .collect();
                let severity = severities[rng.random_range(0..severities.len())];
                ConditionProfile::new(format!("Condition {i}"), severity, "generated")
                    .with_symptoms(symptoms)
            })
            .collect()
    }

    #[test]
    fn test_bounds_and_order_hold_for_random_tables() {
        let pool = [
            "Fever", "Cough", "Rash", "Nausea", "Headache", "Chills", "Fatigue", "Dizziness",
        ];

        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reference = random_reference(&mut rng, &pool);
            let mut symptoms: SymptomSet = pool.iter().filter(|_| rng.random_bool(0.3)).collect();
            if rng.random_bool(0.2) {
                symptoms.insert("Hiccups");
            }
            let limit = rng.random_range(0..=6);
            let config = MatchingConfig::default().with_limit(limit);

            let diseases = predict(&symptoms, &reference, &config, &mut rng);

            assert!(diseases.len() <= limit, "seed {seed}");
            if symptoms.is_empty() {
                assert!(diseases.is_empty(), "seed {seed}");
            } else {
                assert_eq!(diseases.len(), limit.min(reference.len()), "seed {seed}");
            }
            assert!(
                diseases.iter().all(|d| (0.0..=1.0).contains(&d.probability)),
                "seed {seed}: {diseases:?}"
            );
            assert!(
                diseases
                    .windows(2)
                    .all(|w| w[0].probability >= w[1].probability),
                "seed {seed}: not sorted"
            );
        }
    }

    #[test]
    fn test_default_limit_is_three() {
        let catalog = make_test_catalog();
        let matcher = Matcher::new(&catalog);
        let symptoms: SymptomSet = ["Fever"].into_iter().collect();

        let diseases = matcher.predict(&symptoms, &mut StdRng::seed_from_u64(3));
        assert_eq!(diseases.len(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_empty_symptoms_yield_nothing() {
        let catalog = make_test_catalog();
        let matcher = Matcher::new(&catalog);

        let diseases = matcher.predict(&SymptomSet::new(), &mut StdRng::seed_from_u64(0));
        assert!(diseases.is_empty());
    }

    #[test]
    fn test_seeded_prediction_is_deterministic() {
        let catalog = make_test_catalog();
        let matcher = Matcher::new(&catalog);
        let symptoms: SymptomSet = ["Fever", "Cough", "Fatigue"].into_iter().collect();

        let first = matcher.predict(&symptoms, &mut StdRng::seed_from_u64(42));
        let second = matcher.predict(&symptoms, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_common_cold_scenario() {
        let catalog = make_test_catalog();
        let matcher = Matcher::with_config(
            &catalog,
            MatchingConfig::default().with_limit(catalog.len()),
        );
        let symptoms: SymptomSet = ["Cough", "Congestion", "Runny Nose"].into_iter().collect();

        for seed in 0..100 {
            let matches = matcher.find_matches(&symptoms, &mut StdRng::seed_from_u64(seed));
            let cold = matches
                .iter()
                .find(|m| m.condition.name == "Common Cold")
                .unwrap();

            assert_eq!(cold.score.match_count, 3);
            assert!((cold.score.match_rate - 0.6).abs() < 1e-12);
            assert!(cold.score.probability >= 0.42 - 1e-9);
            assert!(cold.score.probability <= 0.6 + 1e-9);
            assert_eq!(
                cold.matched_symptoms,
                vec!["Cough", "Congestion", "Runny Nose"]
            );
        }
    }

    #[test]
    fn test_unknown_symptom_gets_baseline_everywhere() {
        let catalog = make_test_catalog();
        let matcher = Matcher::with_config(
            &catalog,
            MatchingConfig::default().with_limit(catalog.len()),
        );
        let symptoms: SymptomSet = ["Rash"].into_iter().collect();

        for seed in 0..100 {
            let diseases = matcher.predict(&symptoms, &mut StdRng::seed_from_u64(seed));
            assert_eq!(diseases.len(), catalog.len());
            for disease in diseases {
                assert!(
                    (0.05..=0.15).contains(&disease.probability),
                    "{} got {}",
                    disease.name,
                    disease.probability
                );
            }
        }
    }

    #[test]
    fn test_ties_keep_table_order() {
        let reference = vec![
            ConditionProfile::new("First", Severity::Low, "a").with_symptoms(["Fever", "Cough"]),
            ConditionProfile::new("Second", Severity::High, "b").with_symptoms(["Fever", "Chills"]),
            ConditionProfile::new("Third", Severity::Medium, "c").with_symptoms(["Fever", "Rash"]),
        ];
        let config = MatchingConfig {
            limit: 3,
            model: ProbabilityModel {
                noise_min: 1.0,
                noise_max: 1.0,
                ..ProbabilityModel::default()
            },
        };
        let symptoms: SymptomSet = ["Fever"].into_iter().collect();

        let diseases = predict(&symptoms, &reference, &config, &mut StdRng::seed_from_u64(9));
        let names: Vec<&str> = diseases.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert!(diseases.iter().all(|d| (d.probability - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_matched_condition_outranks_baseline() {
        let catalog = make_test_catalog();
        let matcher = Matcher::new(&catalog);
        let symptoms: SymptomSet = ["Nausea", "Vomiting", "Diarrhea", "Stomach Pain"]
            .into_iter()
            .collect();

        for seed in 0..50 {
            let diseases = matcher.predict(&symptoms, &mut StdRng::seed_from_u64(seed));
            assert_eq!(diseases[0].name, "Gastroenteritis");
            assert!(diseases[0].advice.is_some());
        }
    }

    #[test]
    fn test_zero_limit() {
        let catalog = make_test_catalog();
        let matcher = Matcher::with_config(&catalog, MatchingConfig::default().with_limit(0));
        let symptoms: SymptomSet = ["Fever"].into_iter().collect();
        assert!(matcher.predict(&symptoms, &mut StdRng::seed_from_u64(0)).is_empty());
    }
}
