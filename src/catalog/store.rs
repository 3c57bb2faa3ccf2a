use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::core::condition::ConditionProfile;
use crate::core::symptoms::symptom_key;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Condition '{0}' lists no symptoms")]
    EmptySymptoms(String),

    #[error("Duplicate condition name '{0}'")]
    DuplicateCondition(String),

    #[error("Catalog contains no conditions")]
    NoConditions,
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    /// Controlled vocabulary of recognized symptom labels
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub conditions: Vec<ConditionProfile>,
}

/// The condition reference table with its symptom vocabulary.
///
/// Read-only once loaded; share it behind an `Arc` across requests.
#[derive(Debug, Default)]
pub struct ConditionCatalog {
    /// Conditions in table order (the tie-break order for ranking)
    pub conditions: Vec<ConditionProfile>,

    /// Recognized symptom labels, in vocabulary order
    vocabulary: Vec<String>,

    /// Symptom keys of `vocabulary`
    vocabulary_keys: HashSet<String>,

    /// Index: condition name -> index in conditions vec
    name_to_index: HashMap<String, usize>,

    /// Index: symptom key -> indices of conditions listing it
    symptom_to_conditions: HashMap<String, Vec<usize>>,
}

impl ConditionCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is invalid.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/conditions.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load the catalog at `path`, or the embedded one when `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen catalog cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON, a condition with no symptoms,
    /// a duplicate condition name, or an empty condition list.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        if data.conditions.is_empty() {
            return Err(CatalogError::NoConditions);
        }

        let mut catalog = Self::new();
        for label in &data.symptoms {
            catalog.add_symptom(label);
        }
        for mut condition in data.conditions {
            condition.rebuild_indexes();
            catalog.add_condition(condition)?;
        }

        tracing::debug!(
            conditions = catalog.len(),
            symptoms = catalog.vocabulary.len(),
            "Loaded condition catalog"
        );

        Ok(catalog)
    }

    /// Add a label to the vocabulary (no-op if its key is already present)
    pub fn add_symptom(&mut self, label: &str) {
        let key = symptom_key(label);
        if key.is_empty() || !self.vocabulary_keys.insert(key) {
            return;
        }
        self.vocabulary.push(label.trim().to_string());
    }

    /// Add a condition to the catalog.
    ///
    /// Reference symptoms missing from the vocabulary are appended to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the condition has no symptoms or its name is taken.
    pub fn add_condition(&mut self, mut condition: ConditionProfile) -> Result<(), CatalogError> {
        if condition.symptom_keys.is_empty() {
            condition.rebuild_indexes();
        }
        if condition.symptom_keys.is_empty() {
            return Err(CatalogError::EmptySymptoms(condition.name));
        }
        if self.name_to_index.contains_key(&condition.name) {
            return Err(CatalogError::DuplicateCondition(condition.name));
        }

        let index = self.conditions.len();
        self.name_to_index.insert(condition.name.clone(), index);

        for key in &condition.symptom_keys {
            self.symptom_to_conditions
                .entry(key.clone())
                .or_default()
                .push(index);
        }

        for label in &condition.symptoms {
            self.add_symptom(label);
        }

        self.conditions.push(condition);
        Ok(())
    }

    /// Get a condition by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConditionProfile> {
        self.name_to_index
            .get(name)
            .map(|&idx| &self.conditions[idx])
    }

    /// Conditions whose reference symptoms include `label`
    pub fn conditions_with_symptom(&self, label: &str) -> impl Iterator<Item = &ConditionProfile> {
        self.symptom_to_conditions
            .get(&symptom_key(label))
            .into_iter()
            .flatten()
            .map(|&idx| &self.conditions[idx])
    }

    /// The controlled symptom vocabulary
    #[must_use]
    pub fn symptoms(&self) -> &[String] {
        &self.vocabulary
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            symptoms: self.vocabulary.clone(),
            conditions: self.conditions.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of conditions in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Severity;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = ConditionCatalog::load_embedded().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.symptoms().len(), 20);
        assert_eq!(catalog.conditions[0].name, "Common Cold");
    }

    #[test]
    fn test_catalog_get_by_name() {
        let catalog = ConditionCatalog::load_embedded().unwrap();

        let covid = catalog.get("COVID-19").unwrap();
        assert_eq!(covid.severity, Severity::High);
        assert_eq!(covid.symptom_count(), 6);
        assert!(covid.advice.is_some());

        assert!(catalog.get("Nonexistent Condition").is_none());
    }

    #[test]
    fn test_conditions_with_symptom() {
        let catalog = ConditionCatalog::load_embedded().unwrap();

        let names: Vec<&str> = catalog
            .conditions_with_symptom("headache")
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.len(), 5);

        assert_eq!(catalog.conditions_with_symptom("Rash").count(), 0);
    }

    #[test]
    fn test_catalog_to_json_round_trip() {
        let catalog = ConditionCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"conditions\""));

        let reloaded = ConditionCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        assert_eq!(reloaded.symptoms(), catalog.symptoms());
    }

    #[test]
    fn test_rejects_condition_without_symptoms() {
        let json = r#"{
            "version": "1.0.0",
            "created_at": "",
            "conditions": [
                {"name": "Empty", "symptoms": [], "severity": "low", "description": "none"}
            ]
        }"#;
        let err = ConditionCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySymptoms(name) if name == "Empty"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let json = r#"{
            "version": "1.0.0",
            "created_at": "",
            "conditions": [
                {"name": "Flu", "symptoms": ["Fever"], "severity": "low", "description": "a"},
                {"name": "Flu", "symptoms": ["Cough"], "severity": "low", "description": "b"}
            ]
        }"#;
        let err = ConditionCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCondition(name) if name == "Flu"));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let json = r#"{"version": "1.0.0", "created_at": "", "conditions": []}"#;
        assert!(matches!(
            ConditionCatalog::from_json(json),
            Err(CatalogError::NoConditions)
        ));
    }

    #[test]
    fn test_add_condition_extends_vocabulary() {
        let mut catalog = ConditionCatalog::new();
        catalog.add_symptom("Fever");

        let condition = ConditionProfile::new("Test", Severity::Low, "test")
            .with_symptoms(["fever", "Itching"]);
        catalog.add_condition(condition).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.symptoms(), ["Fever".to_string(), "Itching".to_string()]);
        assert_eq!(catalog.get("Test").unwrap().description, "test");
    }

    #[test]
    fn test_large_vocabulary_deduplicates_by_key() {
        let mut catalog = ConditionCatalog::new();
        for i in 0..5000 {
            catalog.add_symptom(&format!("Symptom {i}"));
        }
        for i in 0..5000 {
            catalog.add_symptom(&format!("  symptom_{i} "));
        }
        catalog.add_symptom("   ");

        assert_eq!(catalog.symptoms().len(), 5000);
        assert_eq!(catalog.symptoms()[42], "Symptom 42");
    }
}
