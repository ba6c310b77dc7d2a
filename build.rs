use std::collections::HashSet;
use std::path::Path;

const VALID_SPECIES: &[&str] = &["dog", "cat", "rabbit", "hamster", "other"];
const VALID_URGENCY: &[&str] = &["low", "medium", "high"];

fn main() {
    let catalog_path = Path::new("catalogs/pet_conditions.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nREFERENCE TABLE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the reference table before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nREFERENCE TABLE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nREFERENCE TABLE BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nREFERENCE TABLE BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    assert!(
        catalog.get("version").and_then(|v| v.as_str()).is_some(),
        "\n\nREFERENCE TABLE BUILD ERROR: Missing string 'version' field\n"
    );

    let vocabulary = catalog
        .get("symptom_vocabulary")
        .and_then(|v| v.as_array())
        .unwrap_or_else(|| {
            panic!(
                "\n\nREFERENCE TABLE BUILD ERROR: Missing 'symptom_vocabulary' array\n"
            );
        });
    for (i, label) in vocabulary.iter().enumerate() {
        assert!(
            label.as_str().is_some_and(|s| !s.is_empty()),
            "\n\nREFERENCE TABLE BUILD ERROR: Vocabulary entry {i} must be a non-empty string\n"
        );
    }

    let species = catalog.get("species").unwrap_or_else(|| {
        panic!(
            "\n\nREFERENCE TABLE BUILD ERROR: Missing 'species' field\n\
             The table must have a top-level 'species' array.\n"
        );
    });

    let tables = species.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nREFERENCE TABLE BUILD ERROR: 'species' must be an array\n\
             Got: {species}\n"
        );
    });

    let total_conditions = validate_species_tables(tables);

    println!(
        "cargo:warning=Validated reference table: {} species, {total_conditions} total conditions",
        tables.len()
    );
}

fn validate_species_tables(tables: &[serde_json::Value]) -> usize {
    let mut seen_species = HashSet::new();
    let mut total_conditions = 0;

    for (i, table) in tables.iter().enumerate() {
        let species = table
            .get("species")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| {
                panic!("\n\nREFERENCE TABLE BUILD ERROR: Table at index {i} missing 'species'\n")
            });

        assert!(
            VALID_SPECIES.contains(&species),
            "\n\nREFERENCE TABLE BUILD ERROR: Unknown species '{species}' (index {i})\n\
             Expected one of: {VALID_SPECIES:?}\n"
        );
        assert!(
            seen_species.insert(species),
            "\n\nREFERENCE TABLE BUILD ERROR: Species '{species}' appears more than once\n"
        );

        total_conditions += validate_conditions(table, species);
    }

    total_conditions
}

fn validate_conditions(table: &serde_json::Value, species: &str) -> usize {
    let conditions = table
        .get("conditions")
        .and_then(|c| c.as_array())
        .unwrap_or_else(|| {
            panic!(
                "\n\nREFERENCE TABLE BUILD ERROR: Species '{species}' missing 'conditions' array\n"
            )
        });

    let mut seen_names = HashSet::new();
    for (j, condition) in conditions.iter().enumerate() {
        let name = condition
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| {
                panic!(
                    "\n\nREFERENCE TABLE BUILD ERROR: Species '{species}' condition {j} missing 'name'\n"
                )
            });
        assert!(
            seen_names.insert(name),
            "\n\nREFERENCE TABLE BUILD ERROR: Species '{species}' has duplicate condition '{name}'\n"
        );

        validate_condition_fields(condition, species, name);
    }

    conditions.len()
}

fn validate_condition_fields(condition: &serde_json::Value, species: &str, name: &str) {
    let symptoms = condition
        .get("symptoms")
        .and_then(|v| v.as_array())
        .unwrap_or_else(|| {
            panic!(
                "\n\nREFERENCE TABLE BUILD ERROR: '{species}/{name}' missing 'symptoms' array\n"
            )
        });

    // A condition with no signature can never be scored
    assert!(
        !symptoms.is_empty(),
        "\n\nREFERENCE TABLE BUILD ERROR: '{species}/{name}' has an empty symptom set\n\
         Conditions must define at least one symptom.\n"
    );

    let mut seen = HashSet::new();
    for symptom in symptoms {
        let label = symptom.as_str().unwrap_or_else(|| {
            panic!(
                "\n\nREFERENCE TABLE BUILD ERROR: '{species}/{name}' symptom must be a string\n\
                 Got: {symptom}\n"
            )
        });
        assert!(
            seen.insert(label),
            "\n\nREFERENCE TABLE BUILD ERROR: '{species}/{name}' lists '{label}' twice\n"
        );
    }

    let urgency = condition.get("urgency").and_then(|v| v.as_str());
    assert!(
        urgency.is_some_and(|u| VALID_URGENCY.contains(&u)),
        "\n\nREFERENCE TABLE BUILD ERROR: '{species}/{name}' has invalid urgency {urgency:?}\n\
         Expected one of: {VALID_URGENCY:?}\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the table changes
    println!("cargo:rerun-if-changed=catalogs/pet_conditions.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
