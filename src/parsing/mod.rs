//! Turning user input into a [`SymptomSet`](crate::core::symptoms::SymptomSet).
//!
//! Two input shapes are supported:
//!
//! - **Free text**: a description such as "persistent cough and a mild fever";
//!   vocabulary labels are located in it on word boundaries
//! - **Symptom lists**: labels separated by commas, semicolons or newlines
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::ConditionCatalog;
//! use symptom_solver::parsing::text::{extract_symptoms, parse_symptom_list};
//!
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//! let found = extract_symptoms("I've had a runny nose and a sore throat", catalog.symptoms());
//! assert_eq!(found.len(), 2);
//!
//! let listed = parse_symptom_list("Fever, Chills\nFatigue");
//! assert_eq!(listed.len(), 3);
//! ```

pub mod text;
