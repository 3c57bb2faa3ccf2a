//! Symptom-to-condition matching.
//!
//! - [`Matcher`](engine::Matcher): ranks a catalog's conditions against a symptom set
//! - [`ProbabilityModel`](scoring::ProbabilityModel): constants of the heuristic
//! - [`ConditionScore`](scoring::ConditionScore): per-condition score breakdown
//!
//! ## Heuristic
//!
//! For each condition, `match_rate = |reported ∩ known| / |known|`:
//!
//! 1. **No match**: probability drawn uniformly from the baseline range
//!    (default `[0.05, 0.15]`)
//! 2. **Some match**: `min(0.95, match_rate * noise)` with `noise` drawn
//!    uniformly from `[0.7, 1.0]`
//!
//! Results are sorted by descending probability (ties keep catalog order) and
//! cut to the top K, 3 by default. The randomness source is always passed in.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use symptom_solver::{ConditionCatalog, Matcher, SymptomSet};
//!
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//! let symptoms: SymptomSet = ["Cough", "Congestion", "Runny Nose"].into_iter().collect();
//!
//! let matcher = Matcher::new(&catalog);
//! let mut rng = StdRng::seed_from_u64(7);
//! for disease in matcher.predict(&symptoms, &mut rng) {
//!     println!("{}: {:.0}%", disease.name, disease.probability * 100.0);
//! }
//! ```

pub mod engine;
pub mod scoring;
