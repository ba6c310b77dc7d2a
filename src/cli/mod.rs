//! Command-line interface for pet-triage.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **evaluate**: Rank likely conditions for a species and its observed symptoms
//! - **reference**: List, show, or export the reference table
//! - **serve**: Start the JSON API for phones on the same network
//!
//! ## Usage
//!
//! ```text
//! # Rank conditions for a dog
//! pet-triage evaluate --species dog --symptom 呕吐 --symptom 腹胀
//!
//! # Original species labels and comma-separated symptoms also work
//! pet-triage evaluate --species 猫 --symptom 打喷嚏,咳嗽
//!
//! # Emergency flags bypass matching entirely
//! pet-triage evaluate --species cat --emergency seizure-or-unconscious
//!
//! # JSON output for scripting
//! pet-triage --format json evaluate --species dog --symptom 发烧
//!
//! # Start the API
//! pet-triage serve --address 0.0.0.0 --port 8501
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::ReferenceStore;

pub mod evaluate;
pub mod reference;

#[derive(Parser)]
#[command(name = "pet-triage")]
#[command(version)]
#[command(about = "Rank likely pet conditions from observed symptoms")]
#[command(
    long_about = "pet-triage matches the symptoms you observed against a small curated reference table and returns:\n- An immediate-care directive when an emergency sign is present\n- Up to three likely conditions, ranked by how much of each condition's signature you observed\n- How urgently each one needs a vet\n\nThis is rule matching against a fixed table, not a diagnosis."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank likely conditions for an observed case
    Evaluate(evaluate::EvaluateArgs),

    /// Inspect the reference table
    Reference(reference::ReferenceArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8501")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom reference table file
    #[arg(long)]
    pub catalog: Option<std::path::PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a custom reference table if given, otherwise the embedded one
pub(crate) fn load_store(catalog: Option<&Path>) -> anyhow::Result<ReferenceStore> {
    let store = if let Some(path) = catalog {
        ReferenceStore::load_from_file(path)?
    } else {
        ReferenceStore::load_embedded()?
    };
    Ok(store)
}
