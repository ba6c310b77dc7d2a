//! # pet-triage
//!
//! A library for triaging a pet's observed symptoms against a small curated
//! reference table of conditions.
//!
//! Given a species, the symptoms an owner noticed and any emergency signs,
//! `pet-triage` returns exactly one outcome: an immediate-care directive, a
//! request for more input, a notice that the species has no reference data, a
//! notice that nothing matched, or up to three conditions ranked by how much of
//! each condition's defining signature was observed.
//!
//! This is deterministic rule matching over a fixed table, not a diagnosis.
//!
//! ## Features
//!
//! - **Emergency short-circuit**: any emergency sign bypasses matching
//! - **Signature coverage scoring**: `|observed ∩ signature| / |signature|`,
//!   compared as exact fractions
//! - **Deterministic ranking**: explicit tie-break policy, at most three results
//! - **Urgency directives**: each result carries how soon to see a vet
//!
//! ## Example
//!
//! ```rust,no_run
//! use pet_triage::{ObservedCase, Outcome, ReferenceStore, TriageEngine};
//! use pet_triage::core::types::Species;
//!
//! // Load the embedded reference table
//! let store = ReferenceStore::load_embedded().unwrap();
//!
//! let case = ObservedCase::new(Species::Dog).with_symptoms(["呕吐", "食欲不振", "腹胀"]);
//! let engine = TriageEngine::new(&store);
//!
//! match engine.evaluate(&case) {
//!     Outcome::RankedResults { results, .. } => {
//!         for r in &results {
//!             println!("{}: {} ({})", r.condition_name, r.match_ratio, r.directive);
//!         }
//!     }
//!     other => println!("{}", other.kind()),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference table storage and indexing
//! - [`core`]: Core data types for conditions, cases and urgency
//! - [`matching`]: Triage engine, scoring and outcomes
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON API server

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::catalog::store::ReferenceStore;
pub use crate::core::case::ObservedCase;
pub use crate::core::condition::Condition;
pub use crate::core::types::*;
pub use crate::matching::engine::{MatchResult, MatchingConfig, TriageEngine};
pub use crate::matching::Outcome;
