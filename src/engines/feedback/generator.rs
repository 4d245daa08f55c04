use super::detector::PriorityMap;
use crate::data::write_matrix;
use crate::engines::mutation::{MutationDriver, MutationLogger, MutationRecord};
use crate::error::{Result, VecfuzzError};
use crate::types::{Matrix, Vector};
use std::path::Path;

/// Build the next round's mutated seed subset: priority vectors first, in
/// detection order, then a uniform without-replacement fill from the full
/// seed set. Every applied mutation is logged with its origin. The subset
/// size must equal `floor(total * mutate_ratio)` exactly; a mismatch is a
/// fatal invariant violation raised before the mutation file is written.
pub fn generate_next_round(
    driver: &mut MutationDriver,
    logger: &mut MutationLogger,
    priority: &PriorityMap,
    seed: &[Vector],
    seed_file: &Path,
    mutate_ratio: f64,
    mutation_file: &Path,
) -> Result<Matrix> {
    let required = (seed.len() as f64 * mutate_ratio).floor() as usize;
    let mut next = Matrix::with_capacity(required);

    // Priority vectors, detection order, bounded by the quota. Ids beyond
    // the seed set (stale spectrum data) are dropped.
    let priority_ids: Vec<usize> = priority
        .ids()
        .into_iter()
        .filter(|&id| id <= seed.len())
        .take(required)
        .collect();

    for vector_id in priority_ids {
        let original = &seed[vector_id - 1];
        let (mutated, operator) = driver.mutate_vector(original)?;
        logger.record(&MutationRecord {
            original,
            mutated: &mutated,
            operator,
            source_file: seed_file,
            source_index: vector_id,
            priority: true,
        })?;
        next.push(mutated);
    }

    // Random fill. The priority ids are not excluded from the draw, so a
    // priority vector can be mutated a second time as a random pick.
    if next.len() < required {
        let remaining = required - next.len();
        let picks = rand::seq::index::sample(driver.rng_mut(), seed.len(), remaining);
        for idx in picks.iter() {
            let vector_id = idx + 1;
            let original = &seed[idx];
            let (mutated, operator) = driver.mutate_vector(original)?;
            logger.record(&MutationRecord {
                original,
                mutated: &mutated,
                operator,
                source_file: seed_file,
                source_index: vector_id,
                priority: false,
            })?;
            next.push(mutated);
        }
    }

    if next.len() != required {
        return Err(VecfuzzError::Invariant(format!(
            "Expected {} mutated cases, but got {}",
            required,
            next.len()
        )));
    }

    write_matrix(mutation_file, &next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::feedback::weights::WeightTable;
    use crate::engines::mutation::{parse_enabled, OperatorSelector, ValueRange};

    fn driver(seed: u64) -> MutationDriver {
        let enabled = parse_enabled("578").unwrap();
        let weights = WeightTable::uniform(&enabled);
        let selector = OperatorSelector::new(enabled, &weights).unwrap();
        MutationDriver::new(selector, ValueRange::default(), 16, Some(seed))
    }

    fn int_matrix(rows: &[&[i64]]) -> Matrix {
        rows.iter()
            .map(|row| row.iter().map(|&v| crate::types::Value::Integer(v)).collect())
            .collect()
    }

    #[test]
    fn test_quota_met_with_empty_priority_map() {
        let dir = tempfile::tempdir().unwrap();
        let mutation_file = dir.path().join("1_mutation.dat");
        let mut logger = MutationLogger::open(dir.path().join("mutation.txt")).unwrap();
        let mut driver = driver(23);

        let seed = int_matrix(&[&[1, 2, 3], &[4, 5, 6]]);
        let next = generate_next_round(
            &mut driver,
            &mut logger,
            &PriorityMap::default(),
            &seed,
            Path::new("seed.dat"),
            0.5,
            &mutation_file,
        )
        .unwrap();

        assert_eq!(next.len(), 1);
        let range = ValueRange::default();
        for v in &next[0] {
            assert!(range.contains(*v));
        }

        let contents = std::fs::read_to_string(&mutation_file).unwrap();
        assert_eq!(contents.lines().count(), 1);
        // The subset was logged as a random pick.
        let log = std::fs::read_to_string(dir.path().join("mutation.txt")).unwrap();
        assert!(log.starts_with("Mutation 1 (Random Case):"));
    }

    #[test]
    fn test_priority_vectors_come_first() {
        let dir = tempfile::tempdir().unwrap();
        let mutation_file = dir.path().join("2_mutation.dat");
        let mut logger = MutationLogger::open(dir.path().join("mutation.txt")).unwrap();
        let mut driver = driver(29);

        let seed = int_matrix(&[&[1, 1], &[2, 2], &[3, 3], &[4, 4]]);
        let mut priority = PriorityMap::default();
        priority.annotate(
            3,
            crate::engines::feedback::detector::PriorityAnnotation {
                variable: "add".to_string(),
                extremum: crate::engines::feedback::detector::Extremum::Max,
                operator: crate::engines::mutation::Operator::Bit,
            },
        );

        let next = generate_next_round(
            &mut driver,
            &mut logger,
            &priority,
            &seed,
            Path::new("seed.dat"),
            0.5,
            &mutation_file,
        )
        .unwrap();

        assert_eq!(next.len(), 2);
        let log = std::fs::read_to_string(dir.path().join("mutation.txt")).unwrap();
        assert!(log.contains("Mutation 1 (Priority Case):"));
        assert!(log.contains("Source File: seed.dat, Index: 3"));
        assert!(log.contains("Mutation 2 (Random Case):"));
    }

    #[test]
    fn test_full_ratio_uses_every_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mutation_file = dir.path().join("3_mutation.dat");
        let mut logger = MutationLogger::open(dir.path().join("mutation.txt")).unwrap();
        let mut driver = driver(31);

        let seed = int_matrix(&[&[1], &[2], &[3]]);
        let next = generate_next_round(
            &mut driver,
            &mut logger,
            &PriorityMap::default(),
            &seed,
            Path::new("seed.dat"),
            1.0,
            &mutation_file,
        )
        .unwrap();
        assert_eq!(next.len(), 3);
    }
}
