use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_store, OutputFormat};
use crate::core::case::ObservedCase;
use crate::core::types::{EmergencyFlag, Species};
use crate::matching::engine::{MatchingConfig, TieBreak, TriageEngine};
use crate::matching::outcome::{Guidance, DISCLAIMER};
use crate::matching::Outcome;
use crate::utils::validation::{validate_symptom_labels, warn_unknown_symptoms};

/// How to order results whose match ratios are equal
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum TieBreakArg {
    /// Higher urgency first, then reference table order
    #[default]
    Urgency,
    /// Reference table order
    Table,
    /// Condition name
    Name,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Urgency => TieBreak::UrgencyThenTableOrder,
            TieBreakArg::Table => TieBreak::TableOrder,
            TieBreakArg::Name => TieBreak::Name,
        }
    }
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Species (dog, cat, rabbit, hamster, other; or 狗, 猫, 兔子, 仓鼠, 其他)
    #[arg(long, required = true)]
    pub species: Species,

    /// Observed symptom; repeat or separate with commas
    #[arg(short, long = "symptom", value_delimiter = ',')]
    pub symptoms: Vec<String>,

    /// Emergency sign (breathing-distress, uncontrolled-bleeding, seizure-or-unconscious)
    #[arg(short, long = "emergency", value_delimiter = ',')]
    pub emergency: Vec<EmergencyFlag>,

    /// Number of ranked conditions to show
    #[arg(short = 'n', long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=3))]
    pub max_results: u8,

    /// Ordering for conditions with equal match ratios
    #[arg(long, value_enum, default_value = "urgency")]
    pub tie_break: TieBreakArg,

    /// Path to custom reference table file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute evaluate subcommand
///
/// # Errors
///
/// Returns an error if the reference table cannot be loaded, or a symptom label is
/// invalid while no emergency flag is set.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: EvaluateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = load_store(args.catalog.as_deref())?;

    if verbose {
        eprintln!(
            "Loaded reference table v{} with {} conditions",
            store.version,
            store.len()
        );
    }

    let emergency_flags: BTreeSet<EmergencyFlag> = args.emergency.iter().copied().collect();

    // Any emergency flag decides the outcome, so labels are not checked
    let symptoms = if emergency_flags.is_empty() {
        let symptoms = validate_symptom_labels(args.symptoms.iter().cloned())?;
        warn_unknown_symptoms(&store, &symptoms);
        symptoms
    } else {
        BTreeSet::new()
    };

    let case = ObservedCase {
        species: args.species,
        symptoms,
        emergency_flags,
    };

    let config = MatchingConfig {
        result_limit: usize::from(args.max_results),
        tie_break: args.tie_break.into(),
    };
    let engine = TriageEngine::with_config(&store, config);
    let outcome = engine.evaluate(&case);

    match format {
        OutputFormat::Text => print_text_outcome(&outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Tsv => print_tsv_outcome(&outcome),
    }

    Ok(())
}

fn print_guidance(guidance: &Guidance) {
    println!("{}", guidance.headline);
    println!("\n建议：");
    for (i, step) in guidance.steps.iter().enumerate() {
        println!("   {}. {step}", i + 1);
    }
}

fn print_text_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Emergency { flags, directive } => {
            let signs: Vec<&str> = flags.iter().map(|f| f.label()).collect();
            println!("🚨 紧急情况: {}\n", signs.join(", "));
            println!("{}", directive.headline);
            println!("急救热线: {}", directive.hotline);
            for (i, step) in directive.steps.iter().enumerate() {
                println!("   {}. {step}", i + 1);
            }
            // Nothing else is shown in an emergency
            return;
        }
        Outcome::InsufficientInput { message } => {
            println!("⚠️  {message}");
        }
        Outcome::NoReferenceData { species, guidance } => {
            println!("物种: {}", species.label());
            print_guidance(guidance);
        }
        Outcome::NoMatch { guidance } => {
            print_guidance(guidance);
        }
        Outcome::RankedResults {
            results,
            preparation,
        } => {
            println!("📊 分析结果\n");
            for (i, r) in results.iter().enumerate() {
                println!(
                    "{}. {} (匹配度:{}%) {}",
                    i + 1,
                    r.condition_name,
                    r.match_ratio.percent(),
                    r.urgency.label()
                );
                println!("   匹配症状: {}", r.matched_symptoms.join(", "));
                println!("   {} {}", r.directive.headline(), r.directive.advice());
                println!();
            }

            println!("💡 就医准备建议");
            println!("\n📋 准备材料：");
            for item in preparation.materials {
                println!("   - {item}");
            }
            println!("\n📸 拍照记录：");
            for item in preparation.records {
                println!("   - {item}");
            }
        }
    }

    println!("\n⚠️  {DISCLAIMER}");
}

fn print_tsv_outcome(outcome: &Outcome) {
    println!("rank\tcondition\tmatched\ttotal\tratio\turgency\tdirective\tmatched_symptoms");

    for (i, r) in outcome.results().iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{:.4}\t{}\t{}\t{}",
            i + 1,
            r.condition_name,
            r.match_ratio.matched,
            r.match_ratio.total,
            r.match_ratio.value(),
            r.urgency,
            r.directive,
            r.matched_symptoms.join(",")
        );
    }

    if outcome.results().is_empty() {
        eprintln!("Outcome: {}", outcome.kind());
    }
}
