use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{EmergencyFlag, Species};

/// What the owner reported for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedCase {
    pub species: Species,

    /// Observed symptom labels; may be empty
    #[serde(default)]
    pub symptoms: BTreeSet<String>,

    #[serde(default)]
    pub emergency_flags: BTreeSet<EmergencyFlag>,
}

impl ObservedCase {
    #[must_use]
    pub fn new(species: Species) -> Self {
        Self {
            species,
            symptoms: BTreeSet::new(),
            emergency_flags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms.extend(symptoms.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_emergency_flags<I>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = EmergencyFlag>,
    {
        self.emergency_flags.extend(flags);
        self
    }

    #[must_use]
    pub fn is_emergency(&self) -> bool {
        !self.emergency_flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_deduplicates_symptoms() {
        let case = ObservedCase::new(Species::Dog).with_symptoms(["呕吐", "腹胀", "呕吐"]);
        assert_eq!(case.symptoms.len(), 2);
        assert!(!case.is_emergency());
    }

    #[test]
    fn test_emergency_flag_marks_case() {
        let case = ObservedCase::new(Species::Cat)
            .with_emergency_flags([EmergencyFlag::UncontrolledBleeding]);
        assert!(case.is_emergency());
    }

    #[test]
    fn test_deserialize_defaults() {
        let case: ObservedCase = serde_json::from_str(r#"{"species":"猫"}"#).unwrap();
        assert_eq!(case.species, Species::Cat);
        assert!(case.symptoms.is_empty());
        assert!(case.emergency_flags.is_empty());
    }
}
