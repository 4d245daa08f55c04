use super::traits::ConfigSection;
use crate::error::VecfuzzError;
use serde::{Deserialize, Serialize};

/// Settings for the mutation side of a round: which operators are enabled,
/// the accepted value domain, and the driver's retry cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Selector string: each character is a digit `1..=8` naming one
    /// operator of the catalog. Operators not listed are never sampled and
    /// never take part in weight updates.
    pub enabled_mutations: String,
    pub value_min: i64,
    pub value_max: i64,
    /// Re-draw cap for the driver's defensive range re-check.
    pub max_retries: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            enabled_mutations: "578".to_string(),
            value_min: -(1 << 12),
            value_max: (1 << 12) - 1,
            max_retries: 16,
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), VecfuzzError> {
        if self.enabled_mutations.is_empty() {
            return Err(VecfuzzError::Configuration(
                "At least one mutation operator must be enabled".to_string(),
            ));
        }
        for c in self.enabled_mutations.chars() {
            if !('1'..='8').contains(&c) {
                return Err(VecfuzzError::Configuration(format!(
                    "Invalid operator selector '{}': expected digits 1-8",
                    c
                )));
            }
        }
        let mut seen = [false; 8];
        for c in self.enabled_mutations.chars() {
            let idx = c as usize - '1' as usize;
            if seen[idx] {
                return Err(VecfuzzError::Configuration(format!(
                    "Operator selector '{}' listed more than once",
                    c
                )));
            }
            seen[idx] = true;
        }
        if self.value_min >= self.value_max {
            return Err(VecfuzzError::Configuration(
                "value_min must be below value_max".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(VecfuzzError::Configuration(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
