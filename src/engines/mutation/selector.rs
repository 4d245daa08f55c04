use super::operators::Operator;
use crate::engines::feedback::weights::WeightTable;
use crate::error::{Result, VecfuzzError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Parse the enabled-operator selector string (e.g. `"578"`) into the
/// catalog subset, in selector order.
pub fn parse_enabled(selector: &str) -> Result<Vec<Operator>> {
    let mut enabled = Vec::new();
    for c in selector.chars() {
        let op = Operator::from_digit(c).ok_or_else(|| {
            VecfuzzError::Configuration(format!(
                "Invalid operator selector '{}': expected digits 1-8",
                c
            ))
        })?;
        if enabled.contains(&op) {
            return Err(VecfuzzError::Configuration(format!(
                "Operator selector '{}' listed more than once",
                c
            )));
        }
        enabled.push(op);
    }
    if enabled.is_empty() {
        return Err(VecfuzzError::Configuration(
            "At least one mutation operator must be enabled".to_string(),
        ));
    }
    Ok(enabled)
}

/// Weighted draw over the enabled operator subset. Rebuilt whenever the
/// weight table changes: once at round start and once after the feedback
/// update, so the next-round generation samples from the updated weights.
pub struct OperatorSelector {
    enabled: Vec<Operator>,
    dist: WeightedIndex<f64>,
}

impl OperatorSelector {
    pub fn new(enabled: Vec<Operator>, weights: &WeightTable) -> Result<Self> {
        let table: Vec<f64> = enabled.iter().map(|&op| weights.get(op)).collect();
        let dist = WeightedIndex::new(&table).map_err(|e| {
            VecfuzzError::Configuration(format!("Unusable operator weights {}: {}", weights, e))
        })?;
        Ok(Self { enabled, dist })
    }

    pub fn enabled(&self) -> &[Operator] {
        &self.enabled
    }

    /// Draw one operator, probability proportional to its current weight.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Operator {
        self.enabled[self.dist.sample(rng)]
    }
}
