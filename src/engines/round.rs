use crate::config::AppConfig;
use crate::data::{read_seed_matrix, write_matrix};
use crate::engines::feedback::{
    generate_next_round, implicated_operators, PriorityDetector, PriorityMap,
};
use crate::engines::mutation::{
    parse_enabled, MutationDriver, MutationLogger, Operator, OperatorSelector, ValueRange,
};
use crate::error::{Result, VecfuzzError};
use crate::state::EngineState;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Per-invocation parameters: the three positional arguments of the command
/// surface.
#[derive(Debug, Clone)]
pub struct RoundConfig {
    pub seed_file: PathBuf,
    pub output_file: PathBuf,
    pub mutate_ratio: f64,
}

/// What one round produced, for reporting.
#[derive(Debug)]
pub struct RoundReport {
    pub round: u32,
    pub seed_vectors: usize,
    pub priority_cases: usize,
    pub next_round_vectors: usize,
    pub mutation_file: PathBuf,
    pub priority_file: PathBuf,
    pub priority_spec_file: PathBuf,
}

/// One full cycle: mutate the seed matrix, detect priority cases from the
/// round's spectrum files, reinforce the operator weights, and generate the
/// next round's seed subset. Owns the RNG and threads the persisted engine
/// state through the round.
pub struct RoundEngine {
    app: AppConfig,
    round_config: RoundConfig,
    round: u32,
    enabled: Vec<Operator>,
    state: EngineState,
    driver: MutationDriver,
    logger: MutationLogger,
    detector: PriorityDetector,
}

impl RoundEngine {
    pub fn new(app: AppConfig, round_config: RoundConfig, rng_seed: Option<u64>) -> Result<Self> {
        app.validate()?;
        if round_config.mutate_ratio <= 0.0 || round_config.mutate_ratio > 1.0 {
            return Err(VecfuzzError::Configuration(format!(
                "Mutation ratio must be in (0, 1], got {}",
                round_config.mutate_ratio
            )));
        }

        // The output file name encodes the next round number; spectrum and
        // priority files belong to the round before it.
        let round = extract_round_number(&round_config.output_file)?
            .checked_sub(1)
            .ok_or_else(|| {
                VecfuzzError::Configuration(format!(
                    "Output file round number must be at least 1: {}",
                    round_config.output_file.display()
                ))
            })?;

        app.workspace.ensure_dirs()?;

        let enabled = parse_enabled(&app.mutation.enabled_mutations)?;
        let state = EngineState::load_or_default(app.workspace.state_file(), &enabled)?;
        let range = ValueRange::new(app.mutation.value_min, app.mutation.value_max);
        let selector = OperatorSelector::new(enabled.clone(), &state.weights)?;
        let driver = MutationDriver::new(selector, range, app.mutation.max_retries, rng_seed);
        let logger = MutationLogger::open(app.workspace.mutation_log_file())?;
        let detector = PriorityDetector::new(
            app.feedback
                .spectrum_variables
                .iter()
                .map(|v| app.workspace.spectrum_file(v))
                .collect(),
        );

        Ok(Self {
            app,
            round_config,
            round,
            enabled,
            state,
            driver,
            logger,
            detector,
        })
    }

    pub fn run(&mut self) -> Result<RoundReport> {
        log::info!(
            "Round {}: enabled operators {:?}, weights {}",
            self.round,
            self.enabled,
            self.state.weights
        );

        // Mutate the full seed matrix and write it out.
        let seed = read_seed_matrix(&self.round_config.seed_file)?;
        let (mutated, tracking) = self.driver.mutate_matrix(&seed, 1)?;
        write_matrix(&self.round_config.output_file, &mutated)?;

        // Priority cases from this round's spectrum files.
        let priority = self.detector.detect(&tracking)?;
        let priority_file = self.app.workspace.priority_file(self.round);
        let priority_spec_file = self.app.workspace.priority_spec_file(self.round);
        write_priority_file(&priority_file, &priority)?;
        write_priority_file(&priority_spec_file, &priority)?;

        // Reinforce the operator distribution and persist it.
        let implicated = implicated_operators(&priority.ids(), &tracking);
        self.state.weights.reinforce(&implicated, self.app.feedback.alpha);
        self.append_probability_line()?;
        self.state.save(self.app.workspace.state_file())?;
        log::info!("Round {}: updated weights {}", self.round, self.state.weights);

        // Next round's subset, drawn with the updated weights.
        let selector = OperatorSelector::new(self.enabled.clone(), &self.state.weights)?;
        self.driver.set_selector(selector);
        let mutation_file = mutation_file_path(&self.round_config.output_file);
        let next = generate_next_round(
            &mut self.driver,
            &mut self.logger,
            &priority,
            &seed,
            &self.round_config.seed_file,
            self.round_config.mutate_ratio,
            &mutation_file,
        )?;

        Ok(RoundReport {
            round: self.round,
            seed_vectors: seed.len(),
            priority_cases: priority.len(),
            next_round_vectors: next.len(),
            mutation_file,
            priority_file,
            priority_spec_file,
        })
    }

    fn append_probability_line(&self) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.app.workspace.probability_file())?;
        writeln!(file, "Round {}: {}", self.round, self.state.weights)?;
        Ok(())
    }
}

/// Leading integer of the output file's base name. The detector consults the
/// spectrum/priority files of the round before it.
fn extract_round_number(path: &Path) -> Result<u32> {
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let digits: String = base.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().map_err(|_| {
        VecfuzzError::Configuration(format!(
            "Invalid output file name '{}': expected a leading round number",
            path.display()
        ))
    })
}

/// Derive the mutation file from the output file by inserting `_mutation`
/// before the extension (`3_out.dat` -> `3_out_mutation.dat`).
fn mutation_file_path(output_file: &Path) -> PathBuf {
    let stem = output_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = match output_file.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_mutation.{}", stem, ext),
        None => format!("{}_mutation", stem),
    };
    output_file.with_file_name(name)
}

fn write_priority_file(path: &Path, priority: &PriorityMap) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    if priority.is_empty() {
        writeln!(file, "No priority cases in this round.")?;
    } else {
        for line in priority.summary_lines() {
            writeln!(file, "{}", line)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_round_number() {
        assert_eq!(extract_round_number(Path::new("runs/3_out.dat")).unwrap(), 3);
        assert_eq!(extract_round_number(Path::new("12.dat")).unwrap(), 12);
        assert!(extract_round_number(Path::new("out_3.dat")).is_err());
    }

    #[test]
    fn test_mutation_file_path() {
        assert_eq!(
            mutation_file_path(Path::new("runs/3_out.dat")),
            PathBuf::from("runs/3_out_mutation.dat")
        );
        assert_eq!(
            mutation_file_path(Path::new("4_out")),
            PathBuf::from("4_out_mutation")
        );
    }
}
