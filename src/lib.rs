//! # symptom-solver
//!
//! A library for ranking candidate medical conditions from reported symptoms.
//!
//! Reported symptoms are matched against a catalog of known conditions, each
//! with its reference symptoms, severity and description. The result is a
//! short list of conditions ordered by probability, either computed locally or
//! fetched from a compatible prediction service.
//!
//! The built-in heuristic is a placeholder for a calibrated model and makes no
//! claim to clinical meaning.
//!
//! ## Features
//!
//! - **Bounded, ranked output**: probabilities in [0, 1], top K (default 3)
//! - **Injectable randomness**: pass any `rand::Rng`; seed it for golden tests
//! - **Free-text input**: vocabulary symptoms are located in a description
//! - **Remote or local**: one client contract over HTTP or the in-process matcher
//! - **Bundled service**: an Axum server implementing the same wire contract
//!
//! ## Example
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use symptom_solver::{ConditionCatalog, Matcher, SymptomSet};
//!
//! // Load the embedded catalog of known conditions
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//!
//! let symptoms: SymptomSet = ["Fever", "Cough", "Fatigue"].into_iter().collect();
//! let matcher = Matcher::new(&catalog);
//! let diseases = matcher.predict(&symptoms, &mut StdRng::seed_from_u64(1));
//!
//! for d in diseases {
//!     println!("{} ({}): {:.1}%", d.name, d.severity, d.probability * 100.0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Condition catalog storage and indexing
//! - [`core`]: Core data types for symptoms, conditions and predictions
//! - [`matching`]: The matcher and its probability model
//! - [`parsing`]: Symptom extraction from free text and lists
//! - [`client`]: Prediction client for remote or local predictions
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Prediction service

pub mod catalog;
pub mod cli;
pub mod client;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::ConditionCatalog;
pub use client::{PredictionClient, PredictionError};
pub use crate::core::condition::ConditionProfile;
pub use crate::core::disease::Disease;
pub use crate::core::symptoms::SymptomSet;
pub use crate::core::types::*;
pub use matching::engine::{predict, MatchingConfig, Matcher};
pub use matching::scoring::ProbabilityModel;
