//! Symptom matching, ranking and triage outcomes.
//!
//! - [`TriageEngine`](engine::TriageEngine): main entry point, one [`Outcome`] per case
//! - [`SymptomMatch`](scoring::SymptomMatch) / [`MatchRatio`](scoring::MatchRatio):
//!   overlap between a case and one condition
//! - [`Outcome`]: the five terminal results a caller must branch on
//!
//! ## Evaluation order
//!
//! 1. **Emergency check**: any emergency flag returns [`Outcome::Emergency`]
//!    and nothing else runs
//! 2. **Input check**: no symptoms returns [`Outcome::InsufficientInput`]
//! 3. **Species gate**: a species without a table returns
//!    [`Outcome::NoReferenceData`]
//! 4. **Scoring**: each condition sharing a symptom scores
//!    `|observed ∩ signature| / |signature|`
//! 5. **Ranking**: ratio descending, ties broken by [`TieBreak`](engine::TieBreak),
//!    at most three results; none returns [`Outcome::NoMatch`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use pet_triage::{ObservedCase, Outcome, ReferenceStore, TriageEngine};
//! use pet_triage::core::types::Species;
//!
//! let store = ReferenceStore::load_embedded().unwrap();
//! let engine = TriageEngine::new(&store);
//!
//! let case = ObservedCase::new(Species::Dog).with_symptoms(["呕吐", "腹胀"]);
//! if let Outcome::RankedResults { results, .. } = engine.evaluate(&case) {
//!     for r in &results {
//!         println!("{} {:.0}% ({})", r.condition_name, r.match_ratio.value() * 100.0, r.directive);
//!     }
//! }
//! ```

pub mod engine;
pub mod outcome;
pub mod scoring;

pub use outcome::Outcome;
