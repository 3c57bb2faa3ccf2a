use crate::core::symptoms::{symptom_key, SymptomSet};

/// Reduce free text to space-separated lower-case words, padded with spaces
/// so that `" key "` lookups only hit whole words.
fn word_haystack(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    format!(" {} ", symptom_key(&cleaned))
}

/// Find vocabulary symptoms mentioned in a free-text description.
///
/// Matching is case-insensitive and works on whole words, so "Rash" is found
/// in "a red rash" but not in "crashed". Labels keep their vocabulary
/// spelling.
#[must_use]
pub fn extract_symptoms<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> SymptomSet {
    let haystack = word_haystack(text);

    vocabulary
        .iter()
        .map(AsRef::as_ref)
        .filter(|label| {
            let needle = word_haystack(label);
            !needle.trim().is_empty() && haystack.contains(&needle)
        })
        .collect()
}

/// Parse an explicit list of symptom labels.
///
/// Labels may be separated by commas, semicolons or newlines; blanks and
/// duplicates are dropped.
#[must_use]
pub fn parse_symptom_list(text: &str) -> SymptomSet {
    text.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
