use super::traits::ConfigSection;
use crate::error::VecfuzzError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk layout of the engine's working files. The check directory holds
/// everything the engine writes across rounds (mutation log, probability
/// log, persisted state, per-round priority files); the spectrum directory
/// is filled by external instrumentation and only read here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub check_dir: PathBuf,
    pub spectrum_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            check_dir: PathBuf::from("check"),
            spectrum_dir: PathBuf::from("spectre"),
        }
    }
}

impl WorkspaceConfig {
    pub fn mutation_log_file(&self) -> PathBuf {
        self.check_dir.join("mutation.txt")
    }

    pub fn probability_file(&self) -> PathBuf {
        self.check_dir.join("probability.txt")
    }

    pub fn state_file(&self) -> PathBuf {
        self.check_dir.join("engine_state.json")
    }

    pub fn priority_file(&self, round: u32) -> PathBuf {
        self.check_dir.join(format!("priority_{}.txt", round))
    }

    pub fn priority_spec_file(&self, round: u32) -> PathBuf {
        self.check_dir.join(format!("priority_{}_spec.txt", round))
    }

    pub fn spectrum_file(&self, variable: &str) -> PathBuf {
        self.spectrum_dir.join(format!("{}_sp.txt", variable))
    }

    /// Create both directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.check_dir)?;
        std::fs::create_dir_all(&self.spectrum_dir)
    }
}

impl ConfigSection for WorkspaceConfig {
    fn section_name() -> &'static str {
        "workspace"
    }

    fn validate(&self) -> Result<(), VecfuzzError> {
        if self.check_dir == Path::new("") || self.spectrum_dir == Path::new("") {
            return Err(VecfuzzError::Configuration(
                "check_dir and spectrum_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
