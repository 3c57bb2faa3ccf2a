use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::ConditionCatalog;
use crate::cli::ServeArgs;
use crate::client::local::predict_from_text;
use crate::client::wire::{PredictRequest, SymptomsResponse};
use crate::matching::engine::MatchingConfig;
use crate::utils::validation::validate_symptom_text;

/// Request body limit; leaves room for JSON escaping of a maximal description
pub const MAX_BODY_SIZE: usize = 256 * 1024;

/// Concurrent requests served before callers queue
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
pub struct AppState {
    pub catalog: Arc<ConditionCatalog>,
    pub config: MatchingConfig,
}

/// Error body returned with non-2xx statuses
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Build an error body, logging any internal detail server-side only
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with routes and middleware configured.
///
/// Per-IP rate limiting needs peer addresses and is added in [`run`].
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/symptoms", get(symptoms_handler))
        .route("/api/conditions", get(conditions_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Browser clients are served from other origins
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

fn with_rate_limit(router: Router) -> anyhow::Result<Router> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?;

    Ok(router.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(args.catalog.as_deref())?;
    tracing::info!(conditions = catalog.len(), "Catalog loaded");

    let state = Arc::new(AppState {
        catalog: Arc::new(catalog),
        config: MatchingConfig::default().with_limit(args.max_results),
    });
    let app = with_rate_limit(create_router(state))?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting symptom-solver prediction service at http://{addr}/api");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/symptoms"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Symptom prediction API is running",
    }))
}

/// Rank conditions for a free-text description
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let start_time = std::time::Instant::now();

    let text = match validate_symptom_text(&request.text) {
        Ok(text) => text,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_input",
                    &err.to_string(),
                    None,
                )),
            )
                .into_response();
        }
    };

    let mut rng = StdRng::from_os_rng();
    let response = predict_from_text(&state.catalog, &state.config, text, &mut rng);

    tracing::debug!(
        symptoms = response.symptoms_found.len(),
        predictions = response.predictions.len(),
        elapsed_us = start_time.elapsed().as_micros(),
        "Prediction served"
    );

    Json(response).into_response()
}

/// Return the symptom vocabulary
async fn symptoms_handler(State(state): State<Arc<AppState>>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: state.catalog.symptoms().to_vec(),
    })
}

/// Return list of conditions in catalog
async fn conditions_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let conditions: Vec<serde_json::Value> = state
        .catalog
        .conditions
        .iter()
        .map(|c| {
            serde_json::json!({
                "name": c.name,
                "severity": c.severity,
                "symptoms": c.symptoms,
                "description": c.description,
                "advice": c.advice,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": conditions.len(),
        "conditions": conditions,
    }))
}
