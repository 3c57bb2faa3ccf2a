//! Prediction service over HTTP.
//!
//! This module serves the prediction wire contract with Axum, backed by the
//! matcher and a condition catalog. It is the backend that
//! [`RemoteClient`](crate::client::RemoteClient) talks to.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8000
//! symptom-solver serve
//!
//! # Custom port, custom catalog, five results per request
//! symptom-solver serve --port 3000 --catalog my_conditions.json -n 5
//!
//! # Bind to all interfaces
//! symptom-solver serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Health banner
//! - `POST /api/predict` - Rank conditions for `{"text": "..."}`
//! - `GET /api/symptoms` - The recognized symptom vocabulary
//! - `GET /api/conditions` - List all conditions in the catalog

pub mod server;
