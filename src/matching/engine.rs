use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::{CatalogError, ReferenceStore};
use crate::core::case::ObservedCase;
use crate::core::condition::Condition;
use crate::core::types::{CareDirective, Species, UrgencyTier};
use crate::matching::outcome::{
    Outcome, EMERGENCY_DIRECTIVE, INSUFFICIENT_INPUT_MESSAGE, NO_MATCH_GUIDANCE,
    NO_REFERENCE_DATA_GUIDANCE, VISIT_PREPARATION,
};
use crate::matching::scoring::{MatchRatio, SymptomMatch};

/// One ranked condition for a case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub condition_name: String,

    /// Observed symptoms in the signature, in the condition's defined order
    pub matched_symptoms: Vec<String>,

    pub match_ratio: MatchRatio,

    pub urgency: UrgencyTier,

    /// Advice strength derived from `urgency`
    pub directive: CareDirective,

    /// Position of the condition in its species table
    #[serde(skip)]
    pub table_position: usize,
}

impl MatchResult {
    /// Score one condition; `None` when no observed symptom is in its signature
    #[must_use]
    pub fn score(
        condition: &Condition,
        table_position: usize,
        observed: &BTreeSet<String>,
    ) -> Option<Self> {
        let SymptomMatch { matched, ratio } = SymptomMatch::calculate(observed, condition)?;

        Some(Self {
            condition_name: condition.name.clone(),
            matched_symptoms: matched,
            match_ratio: ratio,
            urgency: condition.urgency,
            directive: condition.urgency.directive(),
            table_position,
        })
    }
}

/// Default and maximum number of ranked results returned
pub const DEFAULT_RESULT_LIMIT: usize = 3;

/// How results with equal match ratios are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Higher urgency first, then reference table order
    #[default]
    UrgencyThenTableOrder,
    /// Reference table order only
    TableOrder,
    /// Condition name, then reference table order
    Name,
}

/// Configuration for the triage engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Number of ranked results to return, clamped to `1..=DEFAULT_RESULT_LIMIT`
    pub result_limit: usize,
    pub tie_break: TieBreak,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            tie_break: TieBreak::default(),
        }
    }
}

/// Turns an [`ObservedCase`] into exactly one [`Outcome`]
pub struct TriageEngine<'a> {
    store: &'a ReferenceStore,
    config: MatchingConfig,
}

impl<'a> TriageEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self {
            store,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new engine with custom configuration
    pub fn with_config(store: &'a ReferenceStore, config: MatchingConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Evaluate a case: emergency check, input check, species gate, then ranking
    pub fn evaluate(&self, case: &ObservedCase) -> Outcome {
        // Step 1: emergency flags win over everything else
        if case.is_emergency() {
            tracing::debug!(flags = case.emergency_flags.len(), "Emergency short-circuit");
            return Outcome::Emergency {
                flags: case.emergency_flags.iter().copied().collect(),
                directive: &EMERGENCY_DIRECTIVE,
            };
        }

        // Step 2: nothing to match on
        if case.symptoms.is_empty() {
            tracing::debug!("No symptoms supplied");
            return Outcome::InsufficientInput {
                message: INSUFFICIENT_INPUT_MESSAGE,
            };
        }

        // Step 3: species without a table get generic guidance
        let Ok(conditions) = self.store.conditions_for(case.species) else {
            tracing::debug!(species = %case.species, "No reference table for species");
            return Outcome::NoReferenceData {
                species: case.species,
                guidance: &NO_REFERENCE_DATA_GUIDANCE,
            };
        };

        // Step 4: score, rank and truncate
        let results = self.rank(case.species, conditions, &case.symptoms);
        tracing::debug!(
            species = %case.species,
            symptoms = case.symptoms.len(),
            results = results.len(),
            "Ranked conditions"
        );

        if results.is_empty() {
            Outcome::NoMatch {
                guidance: &NO_MATCH_GUIDANCE,
            }
        } else {
            Outcome::RankedResults {
                results,
                preparation: &VISIT_PREPARATION,
            }
        }
    }

    /// Rank conditions for a species without the emergency or input checks
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedSpecies`] if the species has no table.
    pub fn find_matches(
        &self,
        species: Species,
        observed: &BTreeSet<String>,
    ) -> Result<Vec<MatchResult>, CatalogError> {
        let conditions = self.store.conditions_for(species)?;
        Ok(self.rank(species, conditions, observed))
    }

    fn rank(
        &self,
        species: Species,
        conditions: &[Condition],
        observed: &BTreeSet<String>,
    ) -> Vec<MatchResult> {
        let finder = CandidateFinder::new(self.store);
        let candidates = finder.find_candidates(species, observed.iter().map(String::as_str));

        let mut results: Vec<MatchResult> = candidates
            .into_iter()
            .filter_map(|pos| MatchResult::score(&conditions[pos], pos, observed))
            .collect();

        // Sort by match ratio descending, then the configured tie-break
        results.sort_by(|a, b| {
            b.match_ratio
                .cmp(&a.match_ratio)
                .then_with(|| self.break_tie(a, b))
        });

        results.truncate(self.config.result_limit.clamp(1, DEFAULT_RESULT_LIMIT));
        results
    }

    fn break_tie(&self, a: &MatchResult, b: &MatchResult) -> Ordering {
        let by_position = a.table_position.cmp(&b.table_position);
        match self.config.tie_break {
            TieBreak::UrgencyThenTableOrder => b.urgency.cmp(&a.urgency).then(by_position),
            TieBreak::TableOrder => by_position,
            TieBreak::Name => a.condition_name.cmp(&b.condition_name).then(by_position),
        }
    }
}
