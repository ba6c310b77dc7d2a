use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::core::condition::{Condition, ConditionError};
use crate::core::types::Species;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read reference table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse reference table: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("No reference table for species '{0}'")]
    UnsupportedSpecies(Species),

    #[error("Species '{0}' appears more than once in the reference table")]
    DuplicateSpecies(Species),

    #[error("Invalid condition '{name}' for species '{species}': {reason}")]
    InvalidCondition {
        species: Species,
        name: String,
        #[source]
        reason: ConditionError,
    },
}

/// Reference table version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Conditions known for one species, in table order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesTable {
    pub species: Species,
    pub conditions: Vec<Condition>,
}

/// Serializable reference table format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Symptom labels offered to callers when collecting a case
    #[serde(default)]
    pub symptom_vocabulary: Vec<String>,
    pub species: Vec<SpeciesTable>,
}

/// The species → condition reference table with indexes
#[derive(Debug)]
pub struct ReferenceStore {
    pub version: String,

    tables: Vec<SpeciesTable>,

    /// Index: species -> position in `tables`
    species_to_index: HashMap<Species, usize>,

    /// Vocabulary as listed in the table
    vocabulary: Vec<String>,

    /// Vocabulary plus every label used in a signature
    known_symptoms: HashSet<String>,

    /// Index: species -> symptom -> positions of conditions carrying it
    pub symptom_index: HashMap<Species, HashMap<String, Vec<usize>>>,
}

impl ReferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            version: CATALOG_VERSION.to_string(),
            tables: Vec::new(),
            species_to_index: HashMap::new(),
            vocabulary: Vec::new(),
            known_symptoms: HashSet::new(),
            symptom_index: HashMap::new(),
        }
    }

    /// Load the embedded default reference table
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/pet_conditions.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a reference table from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a reference table from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                expected = CATALOG_VERSION,
                found = %data.version,
                "Reference table version mismatch"
            );
        }

        let mut store = Self::new();
        store.version = data.version;
        store.set_vocabulary(data.symptom_vocabulary);
        for table in data.species {
            store.add_species_table(table)?;
        }

        tracing::debug!(
            species = store.tables.len(),
            conditions = store.len(),
            "Loaded reference table"
        );

        Ok(store)
    }

    /// Replace the caller-facing symptom vocabulary
    ///
    /// Known symptoms are rebuilt from the new vocabulary and the signatures
    /// already loaded, so labels from an earlier vocabulary are dropped.
    pub fn set_vocabulary(&mut self, vocabulary: Vec<String>) {
        let signatures = self
            .tables
            .iter()
            .flat_map(|t| &t.conditions)
            .flat_map(|c| c.symptoms.iter().cloned());
        self.known_symptoms = vocabulary.iter().cloned().chain(signatures).collect();
        self.vocabulary = vocabulary;
    }

    /// Add the conditions for one species, validating every signature
    pub fn add_species_table(&mut self, mut table: SpeciesTable) -> Result<(), CatalogError> {
        let species = table.species;
        if self.species_to_index.contains_key(&species) {
            return Err(CatalogError::DuplicateSpecies(species));
        }

        let mut names = HashSet::new();
        for condition in &mut table.conditions {
            condition.rebuild_indexes();
            condition
                .validate()
                .map_err(|reason| CatalogError::InvalidCondition {
                    species,
                    name: condition.name.clone(),
                    reason,
                })?;
            if !names.insert(condition.name.clone()) {
                return Err(CatalogError::InvalidCondition {
                    species,
                    name: condition.name.clone(),
                    reason: ConditionError::DuplicateName,
                });
            }
        }

        // Index by symptom
        let index = self.symptom_index.entry(species).or_default();
        for (position, condition) in table.conditions.iter().enumerate() {
            for symptom in &condition.symptoms {
                index.entry(symptom.clone()).or_default().push(position);
                self.known_symptoms.insert(symptom.clone());
            }
        }

        self.species_to_index.insert(species, self.tables.len());
        self.tables.push(table);
        Ok(())
    }

    /// Conditions known for a species, in table order
    pub fn conditions_for(&self, species: Species) -> Result<&[Condition], CatalogError> {
        self.species_to_index
            .get(&species)
            .map(|&idx| self.tables[idx].conditions.as_slice())
            .ok_or(CatalogError::UnsupportedSpecies(species))
    }

    /// Whether a reference table exists for this species
    pub fn supports(&self, species: Species) -> bool {
        self.species_to_index.contains_key(&species)
    }

    /// Supported species, in table order
    pub fn species(&self) -> impl Iterator<Item = Species> + '_ {
        self.tables.iter().map(|t| t.species)
    }

    pub fn tables(&self) -> &[SpeciesTable] {
        &self.tables
    }

    /// Symptom labels offered to callers
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Whether a label belongs to the vocabulary or to any signature
    pub fn is_known_symptom(&self, symptom: &str) -> bool {
        self.known_symptoms.contains(symptom)
    }

    /// Export the reference table to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: self.version.clone(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            symptom_vocabulary: self.vocabulary.clone(),
            species: self.tables.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of conditions across all species
    pub fn len(&self) -> usize {
        self.tables.iter().map(|t| t.conditions.len()).sum()
    }

    /// Check if the store holds no conditions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UrgencyTier;

    #[test]
    fn test_load_embedded_store() {
        let store = ReferenceStore::load_embedded().unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 8);
        assert_eq!(store.version, CATALOG_VERSION);
        assert_eq!(store.species().collect::<Vec<_>>(), vec![Species::Dog, Species::Cat]);
    }

    #[test]
    fn test_conditions_for_dog_in_table_order() {
        let store = ReferenceStore::load_embedded().unwrap();
        let dog = store.conditions_for(Species::Dog).unwrap();

        let names: Vec<&str> = dog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["消化不良", "犬瘟热", "犬细小病毒", "皮肤病"]);
        assert_eq!(dog[1].urgency, UrgencyTier::High);
        assert!(dog[0].has_symptom("腹胀"));
    }

    #[test]
    fn test_conditions_for_unsupported_species() {
        let store = ReferenceStore::load_embedded().unwrap();
        let err = store.conditions_for(Species::Rabbit).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedSpecies(Species::Rabbit)));
        assert!(!store.supports(Species::Hamster));
        assert!(store.supports(Species::Cat));
    }

    #[test]
    fn test_symptom_index() {
        let store = ReferenceStore::load_embedded().unwrap();
        let dog_index = &store.symptom_index[&Species::Dog];

        // 呕吐 is in 消化不良 (0) and 犬细小病毒 (2)
        assert_eq!(dog_index["呕吐"], vec![0, 2]);
        assert!(!dog_index.contains_key("打喷嚏"));
    }

    #[test]
    fn test_known_symptoms_cover_vocabulary_and_signatures() {
        let store = ReferenceStore::load_embedded().unwrap();
        assert_eq!(store.vocabulary().len(), 15);
        assert!(store.is_known_symptom("体重下降"));
        assert!(store.is_known_symptom("腹泻(带血)"));
        assert!(!store.is_known_symptom("vomiting"));
    }

    #[test]
    fn test_set_vocabulary_replaces_known_labels() {
        let mut store = ReferenceStore::new();
        store.set_vocabulary(vec!["咳嗽".to_string(), "流鼻涕".to_string()]);
        store
            .add_species_table(SpeciesTable {
                species: Species::Dog,
                conditions: vec![
                    Condition::new("皮肤病", UrgencyTier::Medium).with_symptoms(["瘙痒", "脱毛"])
                ],
            })
            .unwrap();

        store.set_vocabulary(vec!["呕吐".to_string()]);

        assert_eq!(store.vocabulary(), ["呕吐".to_string()]);
        assert!(store.is_known_symptom("呕吐"));
        assert!(store.is_known_symptom("瘙痒"));
        assert!(!store.is_known_symptom("咳嗽"));
        assert!(!store.is_known_symptom("流鼻涕"));
    }

    #[test]
    fn test_to_json_round_trips_tables() {
        let store = ReferenceStore::load_embedded().unwrap();
        let json = store.to_json().unwrap();

        assert!(json.contains("\"created_at\""));
        assert!(json.contains("犬细小病毒"));

        let reloaded = ReferenceStore::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), store.len());
        assert_eq!(reloaded.vocabulary(), store.vocabulary());
    }

    #[test]
    fn test_rejects_empty_signature() {
        let json = r#"{
            "version": "1.0.0",
            "species": [
                {"species": "dog", "conditions": [
                    {"name": "空", "symptoms": [], "urgency": "low"}
                ]}
            ]
        }"#;
        let err = ReferenceStore::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCondition {
                reason: ConditionError::EmptySignature,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_duplicate_condition_name() {
        let json = r#"{
            "version": "1.0.0",
            "species": [
                {"species": "cat", "conditions": [
                    {"name": "猫瘟", "symptoms": ["发烧"], "urgency": "high"},
                    {"name": "猫瘟", "symptoms": ["呕吐"], "urgency": "high"}
                ]}
            ]
        }"#;
        let err = ReferenceStore::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCondition {
                reason: ConditionError::DuplicateName,
                ..
            }
        ));
        assert!(err.to_string().contains("not unique"));
    }

    #[test]
    fn test_rejects_duplicate_species() {
        let mut store = ReferenceStore::new();
        let table = SpeciesTable {
            species: Species::Dog,
            conditions: vec![Condition::new("皮肤病", UrgencyTier::Medium).with_symptoms(["瘙痒"])],
        };
        store.add_species_table(table.clone()).unwrap();

        let err = store.add_species_table(table).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSpecies(Species::Dog)));
    }

    #[test]
    fn test_parse_error_on_malformed_json() {
        let err = ReferenceStore::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::ParseError(_)));
    }
}
