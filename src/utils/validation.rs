//! Centralized validation for caller-supplied cases.

use std::collections::BTreeSet;

use crate::catalog::store::ReferenceStore;

/// Maximum number of symptom labels accepted in a single case (DOS protection)
pub const MAX_SYMPTOMS: usize = 64;

/// Maximum length of one symptom label, in characters
pub const MAX_SYMPTOM_LABEL_LENGTH: usize = 64;

/// Case validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many symptoms: at most {MAX_SYMPTOMS} are accepted")]
    TooManySymptoms,
    #[error("Empty symptom label provided")]
    EmptySymptomLabel,
    #[error("Symptom label too long: exceeds {MAX_SYMPTOM_LABEL_LENGTH} characters")]
    SymptomLabelTooLong,
    #[error("Invalid symptom label: contains control characters")]
    InvalidSymptomLabel,
}

/// Validate one symptom label without altering it
///
/// Labels are matched by exact equality, so nothing is trimmed or case-folded.
///
/// # Errors
///
/// Returns `ValidationError::EmptySymptomLabel`, `SymptomLabelTooLong` or
/// `InvalidSymptomLabel` for labels that cannot belong to any vocabulary.
pub fn validate_symptom_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptySymptomLabel);
    }

    if label.chars().count() > MAX_SYMPTOM_LABEL_LENGTH {
        return Err(ValidationError::SymptomLabelTooLong);
    }

    if label.chars().any(char::is_control) {
        return Err(ValidationError::InvalidSymptomLabel);
    }

    Ok(())
}

/// Validate a list of labels and collect them into a set
///
/// # Errors
///
/// Returns `ValidationError::TooManySymptoms` if more than [`MAX_SYMPTOMS`]
/// labels are supplied, or the first per-label error.
pub fn validate_symptom_labels<I>(labels: I) -> Result<BTreeSet<String>, ValidationError>
where
    I: IntoIterator<Item = String>,
{
    let mut symptoms = BTreeSet::new();
    for (count, label) in labels.into_iter().enumerate() {
        if count >= MAX_SYMPTOMS {
            return Err(ValidationError::TooManySymptoms);
        }
        validate_symptom_label(&label)?;
        symptoms.insert(label);
    }
    Ok(symptoms)
}

/// Labels that appear neither in the vocabulary nor in any signature
#[must_use]
pub fn unknown_symptoms<'a>(store: &ReferenceStore, symptoms: &'a BTreeSet<String>) -> Vec<&'a str> {
    symptoms
        .iter()
        .map(String::as_str)
        .filter(|s| !store.is_known_symptom(s))
        .collect()
}

/// Log a warning for every label outside the closed vocabulary
///
/// Unknown labels are still accepted; they simply cannot match anything.
pub fn warn_unknown_symptoms(store: &ReferenceStore, symptoms: &BTreeSet<String>) {
    for label in unknown_symptoms(store, symptoms) {
        tracing::warn!(symptom = label, "Symptom is not in the reference vocabulary");
    }
}
