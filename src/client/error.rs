use thiserror::Error;

use crate::utils::validation::ValidationError;

/// Transport failure or non-success status from the prediction service
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("prediction service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to reach prediction service: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NetworkError {
    /// HTTP status, when the service answered
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Transport(err) => err.status(),
        }
    }
}

/// Structurally invalid response body
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prediction '{name}' has probability {probability} outside [0, 1]")]
    ProbabilityOutOfRange { name: String, probability: f64 },
}

/// Failure of a prediction request. A request either yields a complete
/// ranked list or fails with one of these.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// Input rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Recoverable by asking the user to retry
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Fatal for this request
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl From<reqwest::Error> for PredictionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(NetworkError::Transport(err))
    }
}

impl PredictionError {
    /// Short notification text for the presentation layer
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Network(_) => "Failed to generate prediction. Please try again.".to_string(),
            Self::Decode(_) => {
                "The prediction service sent an unreadable response.".to_string()
            }
        }
    }

    /// Whether offering the user a retry makes sense
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
