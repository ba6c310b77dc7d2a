use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_store, OutputFormat};
use crate::core::types::{EmergencyFlag, Species};

#[derive(Args)]
pub struct ReferenceArgs {
    #[command(subcommand)]
    pub command: ReferenceCommands,
}

#[derive(Subcommand)]
pub enum ReferenceCommands {
    /// List the species with a reference table and their conditions
    List {
        /// Path to custom reference table file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the conditions and signatures for one species
    Show {
        /// Species (dog, cat, ...; or 狗, 猫, ...)
        #[arg(required = true)]
        species: Species,

        /// Path to custom reference table file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the symptom vocabulary and emergency signs
    Vocabulary {
        /// Path to custom reference table file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the reference table to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom reference table file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute reference subcommand
///
/// # Errors
///
/// Returns an error if the reference table cannot be loaded or written.
pub fn run(args: ReferenceArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        ReferenceCommands::List { catalog } => run_list(catalog, format, verbose),
        ReferenceCommands::Show { species, catalog } => run_show(species, catalog, format),
        ReferenceCommands::Vocabulary { catalog } => run_vocabulary(catalog, format),
        ReferenceCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let store = load_store(catalog_path.as_deref())?;

    if verbose {
        eprintln!(
            "Loaded reference table v{} with {} conditions",
            store.version,
            store.len()
        );
    }

    match format {
        OutputFormat::Text => {
            println!("Reference table v{}\n", store.version);
            println!("{:<10} {:>10}  Conditions", "Species", "Count");
            println!("{}", "-".repeat(60));
            for table in store.tables() {
                let names: Vec<&str> = table.conditions.iter().map(|c| c.name.as_str()).collect();
                println!(
                    "{:<10} {:>10}  {}",
                    table.species.as_str(),
                    table.conditions.len(),
                    names.join(", ")
                );
            }

            let unsupported: Vec<&str> = Species::ALL
                .into_iter()
                .filter(|s| !store.supports(*s))
                .map(Species::as_str)
                .collect();
            if !unsupported.is_empty() {
                println!("\nNo reference data: {}", unsupported.join(", "));
            }
        }
        OutputFormat::Json => {
            let tables: Vec<serde_json::Value> = store
                .tables()
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "species": t.species,
                        "label": t.species.label(),
                        "condition_count": t.conditions.len(),
                        "conditions": t.conditions.iter().map(|c| &c.name).collect::<Vec<_>>(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "version": store.version,
                "count": store.len(),
                "species": tables,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("species\tcondition\turgency\tsignature_size");
            for table in store.tables() {
                for c in &table.conditions {
                    println!(
                        "{}\t{}\t{}\t{}",
                        table.species,
                        c.name,
                        c.urgency,
                        c.signature_len()
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_show(
    species: Species,
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let store = load_store(catalog_path.as_deref())?;
    let conditions = store.conditions_for(species)?;

    match format {
        OutputFormat::Text => {
            println!("Species: {} ({})\n", species.label(), species);
            for condition in conditions {
                println!(
                    "{} {} [{}]",
                    condition.name,
                    condition.urgency.label(),
                    condition.urgency.directive()
                );
                println!("   症状: {}", condition.symptoms.join(", "));
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "species": species,
                "conditions": conditions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("condition\turgency\tsymptoms");
            for c in conditions {
                println!("{}\t{}\t{}", c.name, c.urgency, c.symptoms.join(","));
            }
        }
    }

    Ok(())
}

fn run_vocabulary(catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let store = load_store(catalog_path.as_deref())?;

    match format {
        OutputFormat::Text => {
            println!("Symptoms:");
            for label in store.vocabulary() {
                println!("   {label}");
            }
            println!("\nEmergency signs:");
            for flag in EmergencyFlag::ALL {
                println!("   {:<24} {}", flag.as_str(), flag.label());
            }
        }
        OutputFormat::Json => {
            let flags: Vec<serde_json::Value> = EmergencyFlag::ALL
                .into_iter()
                .map(|f| serde_json::json!({"id": f, "label": f.label()}))
                .collect();
            let output = serde_json::json!({
                "version": store.version,
                "symptoms": store.vocabulary(),
                "emergency_flags": flags,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("kind\tid\tlabel");
            for label in store.vocabulary() {
                println!("symptom\t{label}\t{label}");
            }
            for flag in EmergencyFlag::ALL {
                println!("emergency\t{}\t{}", flag.as_str(), flag.label());
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let store = load_store(catalog_path.as_deref())?;

    let json = store.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} conditions to {}",
        store.len(),
        output.display()
    );

    Ok(())
}
