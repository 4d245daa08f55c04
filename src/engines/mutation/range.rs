use crate::types::Value;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The accepted value domain: a closed integer interval. Every value an
/// operator emits must land inside it before the vector is accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: -(1 << 12),
            max: (1 << 12) - 1,
        }
    }
}

impl ValueRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Integers clamp to the interval; floats saturate to the boundary as a
    /// float. In-range values pass through untouched (floats are not
    /// rounded). Idempotent.
    pub fn clamp_value(&self, value: Value) -> Value {
        match value {
            Value::Integer(v) => Value::Integer(v.clamp(self.min, self.max)),
            Value::Float(v) => {
                if v < self.min as f64 {
                    Value::Float(self.min as f64)
                } else if v > self.max as f64 {
                    Value::Float(self.max as f64)
                } else {
                    Value::Float(v)
                }
            }
        }
    }

    pub fn clamp_vector(&self, vector: &mut [Value]) {
        for value in vector.iter_mut() {
            *value = self.clamp_value(*value);
        }
    }

    pub fn contains(&self, value: Value) -> bool {
        match value {
            Value::Integer(v) => v >= self.min && v <= self.max,
            Value::Float(v) => v >= self.min as f64 && v <= self.max as f64,
        }
    }

    /// Draw a fresh in-range integer.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }
}
