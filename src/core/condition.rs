use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::core::types::UrgencyTier;

/// Ways a condition can break the reference table invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("symptom set is empty")]
    EmptySignature,

    #[error("symptom labels must not be empty")]
    EmptyLabel,

    #[error("symptom set lists '{0}' more than once")]
    DuplicateLabel(String),

    #[error("name is not unique within its species")]
    DuplicateName,
}

/// A named condition for one species, with its defining symptom signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Unique within its species
    pub name: String,

    /// Defining symptoms, in the order the reference table lists them
    pub symptoms: Vec<String>,

    pub urgency: UrgencyTier,

    // === Pre-computed for matching (populated on load) ===
    /// Set view of `symptoms` for intersection
    #[serde(skip)]
    pub symptom_set: HashSet<String>,
}

impl Condition {
    pub fn new(name: impl Into<String>, urgency: UrgencyTier) -> Self {
        Self {
            name: name.into(),
            symptoms: Vec::new(),
            urgency,
            symptom_set: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms = symptoms.into_iter().map(Into::into).collect();
        self.rebuild_indexes();
        self
    }

    /// Rebuild the symptom set after deserializing or modifying `symptoms`
    pub fn rebuild_indexes(&mut self) {
        self.symptom_set = self.symptoms.iter().cloned().collect();
    }

    /// Size of the defining signature (the match ratio denominator)
    #[must_use]
    pub fn signature_len(&self) -> usize {
        self.symptoms.len()
    }

    #[must_use]
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptom_set.contains(symptom)
    }

    /// Check the signature invariants: non-empty, no repeated labels
    ///
    /// # Errors
    ///
    /// Returns the first [`ConditionError`] the signature violates.
    pub fn validate(&self) -> Result<(), ConditionError> {
        if self.symptoms.is_empty() {
            return Err(ConditionError::EmptySignature);
        }
        if self.symptoms.iter().any(String::is_empty) {
            return Err(ConditionError::EmptyLabel);
        }
        let mut seen = HashSet::new();
        for symptom in &self.symptoms {
            if !seen.insert(symptom.as_str()) {
                return Err(ConditionError::DuplicateLabel(symptom.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_symptoms_builds_set() {
        let condition = Condition::new("消化不良", UrgencyTier::Low)
            .with_symptoms(["呕吐", "食欲不振", "轻微腹泻", "腹胀"]);

        assert_eq!(condition.signature_len(), 4);
        assert!(condition.has_symptom("腹胀"));
        assert!(!condition.has_symptom("发烧"));
        assert!(condition.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_signature() {
        let condition = Condition::new("空", UrgencyTier::Low);
        assert_eq!(condition.validate(), Err(ConditionError::EmptySignature));

        let blank = Condition::new("空白", UrgencyTier::Low).with_symptoms(["呕吐", ""]);
        assert_eq!(blank.validate(), Err(ConditionError::EmptyLabel));
    }

    #[test]
    fn test_validate_rejects_duplicate_labels() {
        let condition =
            Condition::new("重复", UrgencyTier::Medium).with_symptoms(["呕吐", "呕吐"]);
        assert_eq!(
            condition.validate(),
            Err(ConditionError::DuplicateLabel("呕吐".to_string()))
        );
    }

    #[test]
    fn test_deserialize_skips_symptom_set() {
        let json = r#"{"name":"皮肤病","symptoms":["瘙痒","脱毛"],"urgency":"medium"}"#;
        let mut condition: Condition = serde_json::from_str(json).unwrap();
        assert!(condition.symptom_set.is_empty());

        condition.rebuild_indexes();
        assert!(condition.has_symptom("瘙痒"));
        assert_eq!(condition.urgency, UrgencyTier::Medium);
    }
}
