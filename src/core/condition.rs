use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::symptoms::{symptom_key, SymptomSet};
use crate::core::types::Severity;

/// A known condition in the reference catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionProfile {
    /// Unique name, used as the catalog key
    pub name: String,

    /// Reference symptoms, as display labels
    pub symptoms: Vec<String>,

    pub severity: Severity,

    pub description: String,

    /// Guidance copied into every prediction made from this profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,

    // === Pre-computed for fast matching (populated on load) ===
    /// Normalized keys of `symptoms`
    #[serde(skip)]
    pub symptom_keys: HashSet<String>,
}

impl ConditionProfile {
    pub fn new(name: impl Into<String>, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symptoms: Vec::new(),
            severity,
            description: description.into(),
            advice: None,
            symptom_keys: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms = symptoms.into_iter().map(Into::into).collect();
        self.rebuild_indexes();
        self
    }

    #[must_use]
    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice = Some(advice.into());
        self
    }

    /// Rebuild the normalized symptom index (call after deserialization)
    pub fn rebuild_indexes(&mut self) {
        self.symptom_keys = self
            .symptoms
            .iter()
            .map(|s| symptom_key(s))
            .filter(|k| !k.is_empty())
            .collect();
    }

    /// Number of distinct reference symptoms
    #[must_use]
    pub fn symptom_count(&self) -> usize {
        self.symptom_keys.len()
    }

    /// Reference symptom labels present in the reported set, in catalog order
    #[must_use]
    pub fn matched_symptoms(&self, reported: &SymptomSet) -> Vec<String> {
        let mut seen = HashSet::new();
        self.symptoms
            .iter()
            .filter(|s| {
                let key = symptom_key(s);
                reported.contains_key(&key) && seen.insert(key)
            })
            .cloned()
            .collect()
    }

    /// `|reported ∩ known|`
    #[must_use]
    pub fn match_count(&self, reported: &SymptomSet) -> usize {
        self.symptom_keys
            .iter()
            .filter(|k| reported.contains_key(k))
            .count()
    }
}
