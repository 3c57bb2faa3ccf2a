//! Condition reference catalog.
//!
//! The catalog holds the reference table of conditions (each with its known
//! symptoms, severity, description and advice) plus the controlled symptom
//! vocabulary. An embedded catalog is compiled into the binary, but custom
//! catalogs can also be loaded from JSON files.
//!
//! ## Embedded Catalog
//!
//! The default catalog covers five common conditions: Common Cold, Influenza,
//! COVID-19, Gastroenteritis and Migraine, over a 20-symptom vocabulary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::ConditionCatalog;
//! use std::path::Path;
//!
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//! for condition in &catalog.conditions {
//!     println!("{} ({})", condition.name, condition.severity);
//! }
//!
//! // Export, edit, and load a custom table
//! let json = catalog.to_json().unwrap();
//! let custom = ConditionCatalog::load_from_file(Path::new("my_conditions.json")).unwrap();
//! ```

pub mod store;
