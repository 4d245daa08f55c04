use super::operators::Operator;
use super::range::ValueRange;
use super::selector::OperatorSelector;
use crate::error::{Result, VecfuzzError};
use crate::types::{Matrix, Value, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One entry per mutated vector: which operator produced row `vector_id`
/// (1-based). Consumed by the priority detector and the weight updater,
/// lifetime one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingEntry {
    pub vector_id: usize,
    pub operator: Operator,
}

/// Applies one weighted-random operator per vector, re-checking the value
/// domain after the range guard and retrying the same operator against the
/// original vector on violation. The retry is capped; exhausting it is a
/// `MutationExhausted` error rather than an unbounded loop.
pub struct MutationDriver {
    selector: OperatorSelector,
    range: ValueRange,
    max_retries: usize,
    rng: StdRng,
}

impl MutationDriver {
    pub fn new(
        selector: OperatorSelector,
        range: ValueRange,
        max_retries: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            selector,
            range,
            max_retries,
            rng,
        }
    }

    /// Mutate one vector: draw an operator, apply it to a copy, clamp, and
    /// accept only an in-range result.
    pub fn mutate_vector(&mut self, vector: &[Value]) -> Result<(Vector, Operator)> {
        let operator = self.selector.draw(&mut self.rng);

        for attempt in 1..=self.max_retries {
            let mut mutated = operator.apply(vector, &self.range, &mut self.rng);
            self.range.clamp_vector(&mut mutated);

            // Defensive re-check; the range guard makes a violation
            // unreachable for the catalog operators.
            if mutated.iter().all(|&v| self.range.contains(v)) {
                return Ok((mutated, operator));
            }
            log::warn!(
                "Operator {} produced an out-of-range vector (attempt {})",
                operator,
                attempt
            );
        }

        Err(VecfuzzError::MutationExhausted {
            operator: operator.name().to_string(),
            attempts: self.max_retries,
        })
    }

    /// Mutate a whole seed matrix, preserving row order. Vector ids are
    /// 1-based, offset by `start_index`.
    pub fn mutate_matrix(
        &mut self,
        seed: &[Vector],
        start_index: usize,
    ) -> Result<(Matrix, Vec<TrackingEntry>)> {
        let mut mutated = Matrix::with_capacity(seed.len());
        let mut tracking = Vec::with_capacity(seed.len());

        for (offset, vector) in seed.iter().enumerate() {
            let (out, operator) = self.mutate_vector(vector)?;
            mutated.push(out);
            tracking.push(TrackingEntry {
                vector_id: start_index + offset,
                operator,
            });
        }

        Ok((mutated, tracking))
    }

    /// Swap in a selector built from an updated weight table, keeping the
    /// RNG stream intact.
    pub fn set_selector(&mut self, selector: OperatorSelector) {
        self.selector = selector;
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
