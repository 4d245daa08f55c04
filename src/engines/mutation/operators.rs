use super::range::ValueRange;
use crate::types::Value;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed catalog of vector mutation operators. Each is a pure transform:
/// it borrows the input vector and returns a fresh one, drawing randomness
/// from the caller's RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Insert one fresh in-range integer at a random position, or delete one
    /// element at a random position (equal probability).
    Size,
    /// Column-level size change. The driver is row-oriented, so a single
    /// vector is treated as a one-row matrix: delete one uniformly chosen
    /// column or append one fresh in-range integer.
    Dimension,
    /// Overwrite one uniformly chosen element with 0.
    Zero,
    /// Uniform random shuffle of the elements.
    Order,
    /// Add an offset drawn from [-5, 5] to one uniformly chosen element,
    /// preserving its numeric kind.
    Element,
    /// Toggle one element's representation: integer -> float, float ->
    /// truncated integer.
    Type,
    /// Flip one uniformly chosen bit within the minimal bit-width of a
    /// non-zero integer element.
    Bit,
    /// XOR one uniformly chosen byte-aligned 8-bit mask (bits [0,8), [8,16),
    /// [16,24) or [24,32)) into an integer element.
    Byte,
}

pub const OPERATOR_CATALOG: [Operator; 8] = [
    Operator::Size,
    Operator::Dimension,
    Operator::Zero,
    Operator::Order,
    Operator::Element,
    Operator::Type,
    Operator::Bit,
    Operator::Byte,
];

impl Operator {
    /// Map a selector-string digit to its operator.
    pub fn from_digit(c: char) -> Option<Operator> {
        match c {
            '1' => Some(Operator::Size),
            '2' => Some(Operator::Dimension),
            '3' => Some(Operator::Zero),
            '4' => Some(Operator::Order),
            '5' => Some(Operator::Element),
            '6' => Some(Operator::Type),
            '7' => Some(Operator::Bit),
            '8' => Some(Operator::Byte),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Size => "size",
            Operator::Dimension => "dimension",
            Operator::Zero => "zero",
            Operator::Order => "order",
            Operator::Element => "element",
            Operator::Type => "type",
            Operator::Bit => "bit",
            Operator::Byte => "byte",
        }
    }

    /// Apply the operator to one vector. The output still has to pass the
    /// range guard before acceptance; the driver handles that.
    pub fn apply<R: Rng>(&self, vector: &[Value], range: &ValueRange, rng: &mut R) -> Vec<Value> {
        let mut out = vector.to_vec();
        match self {
            Operator::Size => {
                if rng.gen_bool(0.5) {
                    let pos = rng.gen_range(0..=out.len());
                    out.insert(pos, Value::Integer(range.sample(rng)));
                } else if !out.is_empty() {
                    out.remove(rng.gen_range(0..out.len()));
                }
            }
            Operator::Dimension => {
                if rng.gen_bool(0.5) {
                    if !out.is_empty() {
                        out.remove(rng.gen_range(0..out.len()));
                    }
                } else {
                    out.push(Value::Integer(range.sample(rng)));
                }
            }
            Operator::Zero => {
                if !out.is_empty() {
                    let idx = rng.gen_range(0..out.len());
                    out[idx] = Value::Integer(0);
                }
            }
            Operator::Order => {
                out.shuffle(rng);
            }
            Operator::Element => {
                if !out.is_empty() {
                    let idx = rng.gen_range(0..out.len());
                    let delta: i64 = rng.gen_range(-5..=5);
                    out[idx] = match out[idx] {
                        Value::Integer(v) => Value::Integer(v.saturating_add(delta)),
                        Value::Float(v) => Value::Float(v + delta as f64),
                    };
                }
            }
            Operator::Type => {
                if !out.is_empty() {
                    let idx = rng.gen_range(0..out.len());
                    out[idx] = match out[idx] {
                        Value::Integer(v) => Value::Float(v as f64),
                        // Truncation toward zero, matching integer casts.
                        Value::Float(v) => Value::Integer(v.trunc() as i64),
                    };
                }
            }
            Operator::Bit => {
                if !out.is_empty() {
                    let idx = rng.gen_range(0..out.len());
                    if let Value::Integer(v) = out[idx] {
                        if v != 0 {
                            let bit_len = 64 - v.unsigned_abs().leading_zeros();
                            let pos = rng.gen_range(0..bit_len);
                            out[idx] = Value::Integer(v ^ (1i64 << pos));
                        }
                    }
                }
            }
            Operator::Byte => {
                if !out.is_empty() {
                    let idx = rng.gen_range(0..out.len());
                    if let Value::Integer(v) = out[idx] {
                        let byte_pos = rng.gen_range(0..4);
                        let mask = 0xFFi64 << (byte_pos * 8);
                        out[idx] = Value::Integer(v ^ mask);
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn int_vec(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Integer(v)).collect()
    }

    #[test]
    fn test_size_changes_length_by_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[1, 2, 3]);
        for _ in 0..50 {
            let out = Operator::Size.apply(&input, &range, &mut rng);
            assert!(out.len() == 2 || out.len() == 4);
        }
    }

    #[test]
    fn test_zero_writes_a_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[5, 6, 7]);
        let out = Operator::Zero.apply(&input, &range, &mut rng);
        assert_eq!(out.len(), 3);
        assert!(out.contains(&Value::Integer(0)));
    }

    #[test]
    fn test_order_preserves_elements() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[1, 2, 3, 4, 5]);
        let mut out = Operator::Order.apply(&input, &range, &mut rng);
        out.sort_by_key(|v| match v {
            Value::Integer(i) => *i,
            Value::Float(_) => unreachable!(),
        });
        assert_eq!(out, input);
    }

    #[test]
    fn test_element_offset_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[100]);
        for _ in 0..100 {
            let out = Operator::Element.apply(&input, &range, &mut rng);
            match out[0] {
                Value::Integer(v) => assert!((95..=105).contains(&v)),
                Value::Float(_) => unreachable!(),
            }
        }
    }

    #[test]
    fn test_type_toggles_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();

        let out = Operator::Type.apply(&[Value::Integer(3)], &range, &mut rng);
        assert_eq!(out[0], Value::Float(3.0));

        let out = Operator::Type.apply(&[Value::Float(-2.9)], &range, &mut rng);
        assert_eq!(out[0], Value::Integer(-2));
    }

    #[test]
    fn test_bit_flip_stays_in_bit_width() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[0b1010]);
        for _ in 0..100 {
            let out = Operator::Bit.apply(&input, &range, &mut rng);
            match out[0] {
                // One bit below the top bit (bit 3) changed.
                Value::Integer(v) => {
                    let diff = v ^ 0b1010;
                    assert_eq!(diff.count_ones(), 1);
                    assert!(diff.unsigned_abs() <= 0b1000);
                }
                Value::Float(_) => unreachable!(),
            }
        }
    }

    #[test]
    fn test_bit_leaves_zero_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let out = Operator::Bit.apply(&[Value::Integer(0)], &range, &mut rng);
        assert_eq!(out[0], Value::Integer(0));
    }

    #[test]
    fn test_byte_flips_one_aligned_group() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[0]);
        for _ in 0..100 {
            let out = Operator::Byte.apply(&input, &range, &mut rng);
            match out[0] {
                Value::Integer(v) => {
                    assert!([0xFF, 0xFF00, 0xFF_0000, 0xFF00_0000].contains(&v));
                }
                Value::Float(_) => unreachable!(),
            }
        }
    }

    #[test]
    fn test_operators_never_mutate_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        let input = int_vec(&[9, 8, 7]);
        for op in OPERATOR_CATALOG {
            let _ = op.apply(&input, &range, &mut rng);
            assert_eq!(input, int_vec(&[9, 8, 7]));
        }
    }

    #[test]
    fn test_empty_vector_edge_cases() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::default();
        for op in OPERATOR_CATALOG {
            let out = op.apply(&[], &range, &mut rng);
            // Only Size and Dimension may grow an empty vector.
            assert!(out.len() <= 1);
        }
    }
}
