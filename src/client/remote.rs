use std::time::Duration;

use crate::client::error::{DecodeError, NetworkError, PredictionError};
use crate::client::wire::{PredictRequest, PredictResponse, SymptomsResponse};
use crate::core::disease::Disease;
use crate::utils::validation::validate_symptom_text;

/// Base URL used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable holding the base URL
pub const API_URL_ENV: &str = "SYMPTOM_SOLVER_API_URL";

/// HTTP client for a remote prediction service.
///
/// Sends one request per call: no retries and no caching.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000/api`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, NetworkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// `POST {base}/predict`, returning the ranked predictions in wire order
    ///
    /// # Errors
    ///
    /// See [`fetch_prediction_response`](Self::fetch_prediction_response).
    pub async fn fetch_prediction(&self, text: &str) -> Result<Vec<Disease>, PredictionError> {
        Ok(self.fetch_prediction_response(text).await?.predictions)
    }

    /// `POST {base}/predict`, keeping the optional response fields
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Validation` for empty text (no request is
    /// sent), `PredictionError::Network` for transport failures and non-2xx
    /// statuses, and `PredictionError::Decode` for a malformed body.
    pub async fn fetch_prediction_response(
        &self,
        text: &str,
    ) -> Result<PredictResponse, PredictionError> {
        let text = validate_symptom_text(text)?;
        let url = self.endpoint("predict");
        tracing::debug!(%url, chars = text.len(), "Requesting prediction");

        let response = self
            .http
            .post(&url)
            .json(&PredictRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let decoded = PredictResponse::decode(&body)?;
        tracing::debug!(predictions = decoded.predictions.len(), "Prediction received");
        Ok(decoded)
    }

    /// `GET {base}/symptoms`: the service's symptom vocabulary
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Network` for transport failures and non-2xx
    /// statuses, and `PredictionError::Decode` for a malformed body.
    pub async fn fetch_symptoms(&self) -> Result<Vec<String>, PredictionError> {
        let url = self.endpoint("symptoms");
        tracing::debug!(%url, "Requesting symptom vocabulary");

        let response = self.http.get(&url).send().await?;
        let body = Self::success_body(response).await?;
        let decoded: SymptomsResponse =
            serde_json::from_slice(&body).map_err(DecodeError::from)?;
        Ok(decoded.symptoms)
    }

    async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, PredictionError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %response.url(), "Prediction service returned an error");
            return Err(NetworkError::Status(status).into());
        }
        Ok(response.bytes().await?.to_vec())
    }
}
