use serde::{Deserialize, Serialize};

use crate::client::error::DecodeError;
use crate::core::disease::Disease;

/// Message sent alongside an empty result when no symptom was recognized
pub const NO_SYMPTOMS_MESSAGE: &str =
    "No recognizable symptoms found. Please provide more details about how you're feeling.";

/// Body of `POST {base}/predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Response of `POST {base}/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Ranked predictions, most likely first
    pub predictions: Vec<Disease>,

    /// Recognized symptom labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms_found: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PredictResponse {
    #[must_use]
    pub fn new(predictions: Vec<Disease>) -> Self {
        Self {
            predictions,
            symptoms_found: Vec::new(),
            message: None,
        }
    }

    /// Decode and check a response body.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Json` if the body does not match the wire shape and
    /// `DecodeError::ProbabilityOutOfRange` for a probability that is not a
    /// finite value in [0, 1].
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let response: Self = serde_json::from_slice(body)?;
        for disease in &response.predictions {
            if !(0.0..=1.0).contains(&disease.probability) {
                return Err(DecodeError::ProbabilityOutOfRange {
                    name: disease.name.clone(),
                    probability: disease.probability,
                });
            }
        }
        Ok(response)
    }
}

/// Response of `GET {base}/symptoms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Severity;

    fn sample_predictions() -> Vec<Disease> {
        vec![
            Disease {
                name: "Common Cold".to_string(),
                probability: 0.537_214_907_112_3,
                severity: Severity::Low,
                description: "A viral infection.".to_string(),
                advice: Some("Rest.".to_string()),
            },
            Disease {
                name: "Migraine".to_string(),
                probability: 0.071_5,
                severity: Severity::Medium,
                description: "Headaches.".to_string(),
                advice: None,
            },
        ]
    }

    #[test]
    fn test_wire_round_trip() {
        let response = PredictResponse::new(sample_predictions());
        let body = serde_json::to_vec(&response).unwrap();
        let decoded = PredictResponse::decode(&body).unwrap();
        assert_eq!(decoded, response);
        assert_eq!(decoded.predictions, sample_predictions());
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(PredictResponse::new(sample_predictions())).unwrap();
        let first = &value["predictions"][0];
        assert_eq!(first["name"], "Common Cold");
        assert_eq!(first["severity"], "low");
        assert_eq!(first["advice"], "Rest.");
        assert!(value["predictions"][1]["advice"].is_null());
        assert!(value.get("symptoms_found").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_decode_accepts_extra_fields() {
        let body = br#"{
            "predictions": [
                {"name": "Influenza", "probability": 0.4, "severity": "medium",
                 "description": "Flu.", "advice": null}
            ],
            "symptoms_found": ["fever"],
            "model_version": "rf-100"
        }"#;
        let decoded = PredictResponse::decode(body).unwrap();
        assert_eq!(decoded.predictions.len(), 1);
        assert_eq!(decoded.symptoms_found, vec!["fever"]);
    }

    #[test]
    fn test_decode_rejects_malformed_bodies() {
        let bodies: [&[u8]; 4] = [
            b"not json",
            br#"{"results": []}"#,
            br#"{"predictions": [{"name": "X"}]}"#,
            br#"{"predictions": [{"name": "X", "probability": 0.2, "severity": "fatal", "description": ""}]}"#,
        ];
        for body in bodies {
            assert!(matches!(
                PredictResponse::decode(body),
                Err(DecodeError::Json(_))
            ));
        }
    }

    #[test]
    fn test_decode_rejects_out_of_range_probability() {
        let body = br#"{"predictions": [
            {"name": "X", "probability": 1.5, "severity": "low", "description": ""}
        ]}"#;
        assert!(matches!(
            PredictResponse::decode(body),
            Err(DecodeError::ProbabilityOutOfRange { name, .. }) if name == "X"
        ));
    }
}
