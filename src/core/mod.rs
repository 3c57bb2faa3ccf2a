//! Core data types for symptom-based prediction.
//!
//! - [`SymptomSet`](symptoms::SymptomSet): reported symptoms, deduplicated by normalized key
//! - [`ConditionProfile`](condition::ConditionProfile): a reference condition from the catalog
//! - [`Disease`](disease::Disease): one ranked prediction record
//! - [`Severity`](types::Severity), [`Likelihood`](types::Likelihood): classification types
//!
//! ## Symptom Keys
//!
//! Symptoms are compared by a normalized key rather than their display label:
//!
//! | Label              | Key                 |
//! |--------------------|---------------------|
//! | `Runny Nose`       | `runny nose`        |
//! | `runny_nose`       | `runny nose`        |
//! | `Loss of  Appetite`| `loss of appetite`  |

pub mod condition;
pub mod disease;
pub mod symptoms;
pub mod types;
