use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalize a symptom label into its comparison key.
///
/// Keys are lower-cased, treat `_` as a space and collapse runs of whitespace,
/// so `"Runny Nose"`, `"runny_nose"` and `"  runny  nose "` share one key.
///
/// # Examples
///
/// ```
/// use symptom_solver::core::symptoms::symptom_key;
///
/// assert_eq!(symptom_key("Runny Nose"), "runny nose");
/// assert_eq!(symptom_key(" loss_of  taste "), "loss of taste");
/// ```
#[must_use]
pub fn symptom_key(label: &str) -> String {
    label
        .replace('_', " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A set of reported symptoms.
///
/// Membership is decided by [`symptom_key`]; the first label seen for a key is
/// kept for display. Labels outside any vocabulary are accepted and simply
/// match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomSet {
    /// key -> display label
    entries: BTreeMap<String, String>,
}

impl SymptomSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. Returns false if the label was blank or already present.
    pub fn insert(&mut self, label: impl AsRef<str>) -> bool {
        let label = label.as_ref().trim();
        let key = symptom_key(label);
        if key.is_empty() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, label.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(&symptom_key(label))
    }

    /// Check membership by an already-normalized key
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display labels, ordered by key
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Join labels into a free-text description for the remote contract
    #[must_use]
    pub fn to_text(&self) -> String {
        self.labels().collect::<Vec<_>>().join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl From<Vec<String>> for SymptomSet {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<SymptomSet> for Vec<String> {
    fn from(set: SymptomSet) -> Self {
        set.entries.into_values().collect()
    }
}
