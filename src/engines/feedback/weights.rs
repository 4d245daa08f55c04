use crate::engines::mutation::operators::Operator;
use crate::engines::mutation::TrackingEntry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Operators implicated by this round's priority cases: for every priority
/// vector id with a tracking entry, the operator that produced it.
pub fn implicated_operators(
    priority_ids: &[usize],
    tracking: &[TrackingEntry],
) -> HashSet<Operator> {
    priority_ids
        .iter()
        .filter(|&&id| id >= 1 && id <= tracking.len())
        .map(|&id| tracking[id - 1].operator)
        .collect()
}

/// Probability distribution over the enabled operators. The only state
/// besides the mutation log index that survives across rounds.
///
/// Invariant: weights are non-negative and sum to 1 (within floating
/// tolerance) after every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: BTreeMap<Operator, f64>,
}

impl WeightTable {
    /// Equal weight over the enabled subset.
    pub fn uniform(operators: &[Operator]) -> Self {
        let share = 1.0 / operators.len() as f64;
        Self {
            weights: operators.iter().map(|&op| (op, share)).collect(),
        }
    }

    pub fn get(&self, operator: Operator) -> f64 {
        self.weights.get(&operator).copied().unwrap_or(0.0)
    }

    pub fn operators(&self) -> Vec<Operator> {
        self.weights.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// True when the table covers exactly the given operator set.
    pub fn covers(&self, operators: &[Operator]) -> bool {
        self.weights.len() == operators.len()
            && operators.iter().all(|op| self.weights.contains_key(op))
    }

    /// Reinforcement update: operators implicated in a priority case gain
    /// `alpha`, every other enabled operator pays `alpha / (n - 1)`, the
    /// result is floored at zero and renormalized to sum to 1.
    ///
    /// Applied once per round, even when no operator was implicated.
    pub fn reinforce(&mut self, implicated: &HashSet<Operator>, alpha: f64) {
        let n = self.weights.len();
        if n < 2 {
            // A lone operator keeps its whole probability mass; the penalty
            // term would divide by zero.
            return;
        }
        let penalty = alpha / (n - 1) as f64;

        for (op, weight) in self.weights.iter_mut() {
            if implicated.contains(op) {
                *weight += alpha;
            } else {
                *weight -= penalty;
            }
        }

        for weight in self.weights.values_mut() {
            *weight = weight.max(0.0);
        }

        let total: f64 = self.weights.values().sum();
        if total > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= total;
            }
        } else {
            log::warn!("All operator weights hit zero; resetting to uniform");
            let share = 1.0 / n as f64;
            for weight in self.weights.values_mut() {
                *weight = share;
            }
        }
    }
}

impl fmt::Display for WeightTable {
    /// Stable text form used by the probability log, in catalog order:
    /// `{element: 0.333333, bit: 0.333333, byte: 0.333333}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .weights
            .iter()
            .map(|(op, w)| format!("{}: {:.6}", op, w))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
