use super::traits::ConfigSection;
use crate::error::VecfuzzError;
use serde::{Deserialize, Serialize};

/// Settings for the feedback side of a round: the reinforcement learning
/// rate and the monitored variables whose spectrum files are consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Fixed increment added to the weight of every operator implicated in a
    /// priority case; its cost is spread evenly over the others.
    pub alpha: f64,
    /// Monitored variables; the detector looks for `<variable>_sp.txt` in
    /// the spectrum directory. Missing files are skipped with a warning.
    pub spectrum_variables: Vec<String>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            alpha: 0.04,
            spectrum_variables: vec![
                "input_a".to_string(),
                "input_b".to_string(),
                "add_result".to_string(),
                "subtract_result".to_string(),
                "divide".to_string(),
                "multiply".to_string(),
                "bitwise_and".to_string(),
                "bitwise_or".to_string(),
                "bitwise_xor".to_string(),
                "mod_result".to_string(),
            ],
        }
    }
}

impl ConfigSection for FeedbackConfig {
    fn section_name() -> &'static str {
        "feedback"
    }

    fn validate(&self) -> Result<(), VecfuzzError> {
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(VecfuzzError::Configuration(
                "alpha must be strictly between 0 and 1".to_string(),
            ));
        }
        if self.spectrum_variables.is_empty() {
            return Err(VecfuzzError::Configuration(
                "At least one spectrum variable must be configured".to_string(),
            ));
        }
        Ok(())
    }
}
