use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

const CATALOG_PATH: &str = "catalogs/conditions.json";
const SEVERITIES: [&str; 3] = ["low", "medium", "high"];

fn main() {
    let catalog = load_condition_catalog(Path::new(CATALOG_PATH));
    let vocabulary = check_vocabulary(&catalog);
    let conditions = check_conditions(&catalog, &vocabulary);

    println!(
        "cargo:warning=Validated condition catalog: {conditions} conditions over {} symptoms",
        vocabulary.len()
    );
    println!("cargo:rerun-if-changed={CATALOG_PATH}");
    println!("cargo:rerun-if-changed=build.rs");
}

fn fail(problem: &str) -> ! {
    panic!("\n\nCONDITION CATALOG ERROR ({CATALOG_PATH}): {problem}\n");
}

fn load_condition_catalog(path: &Path) -> Value {
    if !path.exists() {
        fail("file not found; the embedded catalog must exist before building");
    }

    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("cannot read file: {e}")));
    let catalog: Value = serde_json::from_str(&text)
        .unwrap_or_else(|e| fail(&format!("not valid JSON: {e}")));

    if !catalog.is_object() {
        fail("top level must be an object with 'symptoms' and 'conditions'");
    }
    catalog
}

/// Symptom keys of the vocabulary, lower-cased
fn check_vocabulary(catalog: &Value) -> HashSet<String> {
    let Some(labels) = catalog.get("symptoms").and_then(Value::as_array) else {
        fail("missing 'symptoms' vocabulary array");
    };

    let mut keys = HashSet::new();
    for label in labels {
        match label.as_str().map(str::trim) {
            Some(label) if !label.is_empty() => {
                if !keys.insert(label.to_lowercase()) {
                    fail(&format!("vocabulary lists '{label}' twice"));
                }
            }
            _ => fail(&format!("vocabulary entry {label} is not a non-blank string")),
        }
    }
    keys
}

fn check_conditions(catalog: &Value, vocabulary: &HashSet<String>) -> usize {
    let conditions = match catalog.get("conditions").and_then(Value::as_array) {
        Some(conditions) if !conditions.is_empty() => conditions,
        Some(_) => fail("'conditions' is empty"),
        None => fail("missing 'conditions' array"),
    };

    let mut names = HashSet::new();
    for (index, condition) in conditions.iter().enumerate() {
        let Some(name) = condition.get("name").and_then(Value::as_str) else {
            fail(&format!("condition #{index} has no name"));
        };
        if !names.insert(name) {
            fail(&format!("condition '{name}' is defined twice"));
        }

        if condition.get("description").and_then(Value::as_str).is_none() {
            fail(&format!("condition '{name}' has no description"));
        }

        let severity = condition.get("severity").and_then(Value::as_str);
        if !severity.is_some_and(|s| SEVERITIES.contains(&s)) {
            fail(&format!(
                "condition '{name}' has severity {severity:?}; expected low, medium or high"
            ));
        }

        // Match rates divide by this count
        let symptoms = condition
            .get("symptoms")
            .and_then(Value::as_array)
            .filter(|symptoms| !symptoms.is_empty())
            .unwrap_or_else(|| fail(&format!("condition '{name}' lists no symptoms")));

        for symptom in symptoms {
            let label = symptom.as_str().unwrap_or_default().trim();
            if !vocabulary.contains(&label.to_lowercase()) {
                fail(&format!(
                    "condition '{name}' uses symptom {symptom} missing from the vocabulary"
                ));
            }
        }
    }

    conditions.len()
}
