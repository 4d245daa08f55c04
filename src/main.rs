use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use vecfuzz::config::AppConfig;
use vecfuzz::engines::{RoundConfig, RoundEngine};

/// Feedback-directed mutation engine for numeric test vectors.
#[derive(Parser)]
#[command(name = "vecfuzz", version)]
struct Cli {
    /// Seed matrix: one test vector per line, space-separated integers
    seed_file: PathBuf,

    /// Mutated output file; its leading integer encodes the round number
    output_file: PathBuf,

    /// Fraction of the seed set to mutate into the next round, in (0, 1]
    mutate_ratio: f64,

    /// TOML configuration file (defaults used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fix the RNG seed (for reproducing a mutation sequence)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    let round_config = RoundConfig {
        seed_file: cli.seed_file,
        output_file: cli.output_file.clone(),
        mutate_ratio: cli.mutate_ratio,
    };

    let mut engine = RoundEngine::new(config, round_config, cli.seed)?;
    let report = engine.run()?;

    println!("Round {} complete", report.round);
    println!("Mutated {} seed vectors to: {}", report.seed_vectors, cli.output_file.display());
    println!("Priority cases found: {}", report.priority_cases);
    println!("Priority cases saved to: {}", report.priority_file.display());
    println!(
        "Priority specifications saved to: {}",
        report.priority_spec_file.display()
    );
    println!(
        "Next round ({} vectors) saved to: {}",
        report.next_round_vectors,
        report.mutation_file.display()
    );

    Ok(())
}
