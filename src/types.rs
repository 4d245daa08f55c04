use serde::{Deserialize, Serialize};
use std::fmt;

/// A single test-vector element. Seed files only contain integers; floats
/// appear when the type mutation converts an element and stay float until a
/// later type mutation truncates them back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Integer(v) => *v as f64,
            Value::Float(v) => *v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            // Integral floats keep a trailing ".0" so the two numeric kinds
            // stay distinguishable in text output.
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

/// One test vector (one row of the seed matrix).
pub type Vector = Vec<Value>;

/// An ordered set of test vectors. Row order is meaningful: row `i` is
/// vector id `i + 1` in tracking entries, priority cases and log records.
pub type Matrix = Vec<Vector>;

/// Bracketed list-literal form used in mutation log records,
/// e.g. `[1, -3, 2.0]`.
pub fn format_vector(vector: &[Value]) -> String {
    let elems: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
    format!("[{}]", elems.join(", "))
}

/// Space-separated line form used by seed/output/mutation files.
pub fn format_vector_line(vector: &[Value]) -> String {
    let elems: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
    elems.join(" ")
}
