//! Core data types for pet symptom triage.
//!
//! - [`Condition`](condition::Condition): a named condition with its symptom signature
//! - [`ObservedCase`](case::ObservedCase): what the owner reported for one request
//! - [`Species`](types::Species), [`UrgencyTier`](types::UrgencyTier),
//!   [`EmergencyFlag`](types::EmergencyFlag), [`CareDirective`](types::CareDirective)
//!
//! ## Symptom labels
//!
//! Symptoms are plain strings drawn from a closed vocabulary shipped with the
//! reference table. Matching compares labels by exact equality; there is no
//! normalization of case, whitespace or synonyms.

pub mod case;
pub mod condition;
pub mod types;
