//! Input validation shared by the client, the server and the CLI.

/// Maximum accepted length of a symptom description, in bytes
pub const MAX_TEXT_LENGTH: usize = 64 * 1024;

/// Maximum number of symptoms accepted in a structured list
pub const MAX_SYMPTOMS: usize = 200;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please describe your symptoms.")]
    EmptyInput,
    #[error("Symptom description too long: exceeds {MAX_TEXT_LENGTH} bytes")]
    TextTooLong,
    #[error("Too many symptoms: exceeds maximum of {MAX_SYMPTOMS}")]
    TooManySymptoms,
    #[error("Symptom description contains control characters")]
    InvalidCharacters,
}

/// Validate a free-text symptom description and return it trimmed.
///
/// # Examples
///
/// ```
/// use symptom_solver::utils::validation::{validate_symptom_text, ValidationError};
///
/// assert_eq!(validate_symptom_text("  mild fever ").unwrap(), "mild fever");
/// assert_eq!(validate_symptom_text(" \n\t"), Err(ValidationError::EmptyInput));
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyInput` for empty or whitespace-only text,
/// `ValidationError::TextTooLong` above [`MAX_TEXT_LENGTH`], or
/// `ValidationError::InvalidCharacters` if it contains control characters
/// other than whitespace.
pub fn validate_symptom_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if trimmed.len() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TextTooLong);
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() && !c.is_whitespace())
    {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(trimmed)
}

/// Check the size of a structured symptom list.
///
/// # Errors
///
/// Returns `ValidationError::EmptyInput` when `count` is zero or
/// `ValidationError::TooManySymptoms` above [`MAX_SYMPTOMS`].
pub fn check_symptom_count(count: usize) -> Result<(), ValidationError> {
    if count == 0 {
        Err(ValidationError::EmptyInput)
    } else if count > MAX_SYMPTOMS {
        Err(ValidationError::TooManySymptoms)
    } else {
        Ok(())
    }
}
