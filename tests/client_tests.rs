//! Prediction client against in-process HTTP services.
//!
//! Each test binds an Axum router to an ephemeral local port and points a
//! `RemoteClient` at it.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use symptom_solver::client::{
    DecodeError, NetworkError, PredictResponse, PredictionError, RemoteClient,
};
use symptom_solver::utils::validation::ValidationError;
use symptom_solver::web::server::{create_router, AppState};
use symptom_solver::{ConditionCatalog, Disease, MatchingConfig, Severity};
use tokio::net::TcpListener;

/// Serve `router` on 127.0.0.1 and return its `/api` base URL
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn prediction_service() -> Router {
    let catalog = ConditionCatalog::load_embedded().unwrap();
    create_router(Arc::new(AppState {
        catalog: Arc::new(catalog),
        config: MatchingConfig::default(),
    }))
}

fn fixed_predictions() -> Vec<Disease> {
    vec![
        Disease {
            name: "Influenza".to_string(),
            probability: 0.81,
            severity: Severity::Medium,
            description: "Flu.".to_string(),
            advice: Some("Rest and fluids.".to_string()),
        },
        Disease {
            name: "COVID-19".to_string(),
            probability: 0.64,
            severity: Severity::High,
            description: "SARS-CoV-2.".to_string(),
            advice: None,
        },
    ]
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let client = RemoteClient::new(&spawn(router).await).unwrap();

    let err = client.fetch_prediction("fever and cough").await.unwrap_err();
    match err {
        PredictionError::Network(NetworkError::Status(status)) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_is_network_error() {
    let client = RemoteClient::new(&spawn(Router::new()).await).unwrap();
    let err = client.fetch_symptoms().await.unwrap_err();
    assert!(err.is_retryable());
    match err {
        PredictionError::Network(net) => assert_eq!(net.status(), Some(StatusCode::NOT_FOUND)),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { Json(serde_json::json!({"result": "influenza"})) }),
    );
    let client = RemoteClient::new(&spawn(router).await).unwrap();

    let err = client.fetch_prediction("fever").await.unwrap_err();
    assert!(matches!(err, PredictionError::Decode(DecodeError::Json(_))));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_out_of_range_probability_is_decode_error() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async {
            Json(serde_json::json!({"predictions": [
                {"name": "X", "probability": 12.0, "severity": "low", "description": "", "advice": null}
            ]}))
        }),
    );
    let client = RemoteClient::new(&spawn(router).await).unwrap();

    let err = client.fetch_prediction("fever").await.unwrap_err();
    assert!(matches!(
        err,
        PredictionError::Decode(DecodeError::ProbabilityOutOfRange { .. })
    ));
}

#[tokio::test]
async fn test_predictions_returned_in_wire_order() {
    let router = Router::new().route(
        "/api/predict",
        post(|Json(request): Json<serde_json::Value>| async move {
            assert_eq!(request["text"], "fever and chills");
            Json(PredictResponse::new(fixed_predictions()))
        }),
    );
    let client = RemoteClient::new(&spawn(router).await).unwrap();

    let diseases = client.fetch_prediction("  fever and chills ").await.unwrap();
    assert_eq!(diseases, fixed_predictions());
}

#[tokio::test]
async fn test_empty_text_never_reaches_the_service() {
    // Any request that got through would surface as a network error
    let router = Router::new().route(
        "/api/predict",
        post(|| async { StatusCode::IM_A_TEAPOT }),
    );
    let client = RemoteClient::new(&spawn(router).await).unwrap();

    let err = client.fetch_prediction("\n\t ").await.unwrap_err();
    assert!(matches!(
        err,
        PredictionError::Validation(ValidationError::EmptyInput)
    ));
}

#[tokio::test]
async fn test_against_bundled_service() {
    let client = RemoteClient::new(&spawn(prediction_service()).await).unwrap();

    let response = client
        .fetch_prediction_response("Nausea, vomiting and diarrhea since last night")
        .await
        .unwrap();
    assert_eq!(response.predictions.len(), 3);
    assert_eq!(response.predictions[0].name, "Gastroenteritis");
    assert_eq!(response.predictions[0].severity, Severity::Medium);
    assert!(response
        .predictions
        .iter()
        .all(|d| (0.0..=1.0).contains(&d.probability)));
    assert_eq!(response.symptoms_found.len(), 3);
}

#[tokio::test]
async fn test_bundled_service_vocabulary() {
    let client = RemoteClient::new(&spawn(prediction_service()).await).unwrap();

    let symptoms = client.fetch_symptoms().await.unwrap();
    assert_eq!(symptoms.len(), 20);
    assert!(symptoms.iter().any(|s| s == "Loss of Taste or Smell"));
}

#[tokio::test]
async fn test_bundled_service_unrecognized_text() {
    let client = RemoteClient::new(&spawn(prediction_service()).await).unwrap();

    let response = client
        .fetch_prediction_response("nothing specific")
        .await
        .unwrap();
    assert!(response.predictions.is_empty());
    assert!(response.message.is_some());
}

#[tokio::test]
async fn test_symptoms_endpoint_shape_checked() {
    let router = Router::new().route(
        "/api/symptoms",
        get(|| async { Json(serde_json::json!({"symptoms": "fever"})) }),
    );
    let client = RemoteClient::new(&spawn(router).await).unwrap();

    let err = client.fetch_symptoms().await.unwrap_err();
    assert!(matches!(err, PredictionError::Decode(_)));
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let client = RemoteClient::new(&spawn(prediction_service()).await).unwrap();

    let texts = ["cough and congestion", "headache and dizziness", "fever"];
    let handles: Vec<_> = texts
        .iter()
        .map(|text| {
            let client = client.clone();
            let text = text.to_string();
            tokio::spawn(async move { client.fetch_prediction(&text).await })
        })
        .collect();

    for handle in handles {
        let diseases = handle.await.unwrap().unwrap();
        assert_eq!(diseases.len(), 3);
    }
}
