use crate::data::read_spectrum;
use crate::engines::mutation::{Operator, TrackingEntry};
use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extremum::Max => f.write_str("Max"),
            Extremum::Min => f.write_str("Min"),
        }
    }
}

/// One hit: a monitored variable peaked (or bottomed) on this vector, and
/// this operator produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityAnnotation {
    pub variable: String,
    pub extremum: Extremum,
    pub operator: Operator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCase {
    pub vector_id: usize,
    pub annotations: Vec<PriorityAnnotation>,
}

/// Priority cases of one round, in detection order (file order, then vector
/// order within a file). A vector id accumulates multiple annotations when
/// several variables peak on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityMap {
    cases: Vec<PriorityCase>,
}

impl PriorityMap {
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriorityCase> {
        self.cases.iter()
    }

    /// Vector ids in detection order.
    pub fn ids(&self) -> Vec<usize> {
        self.cases.iter().map(|c| c.vector_id).collect()
    }

    pub fn annotate(&mut self, vector_id: usize, annotation: PriorityAnnotation) {
        match self.cases.iter_mut().find(|c| c.vector_id == vector_id) {
            Some(case) => case.annotations.push(annotation),
            None => self.cases.push(PriorityCase {
                vector_id,
                annotations: vec![annotation],
            }),
        }
    }

    /// One summary line per case:
    /// `Test Vector 4: add (Max, bit); input (Min, byte)`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.cases
            .iter()
            .map(|case| {
                let details: Vec<String> = case
                    .annotations
                    .iter()
                    .map(|a| format!("{} ({}, {})", a.variable, a.extremum, a.operator))
                    .collect();
                format!("Test Vector {}: {}", case.vector_id, details.join("; "))
            })
            .collect()
    }
}

/// Finds the vectors whose recorded signal hit a round-wide extremum for
/// some monitored variable.
pub struct PriorityDetector {
    spectrum_files: Vec<PathBuf>,
}

impl PriorityDetector {
    /// One spectrum file per monitored variable, in configuration order.
    pub fn new(spectrum_files: Vec<PathBuf>) -> Self {
        Self { spectrum_files }
    }

    /// Scan every spectrum file that exists; missing or empty files are
    /// skipped with a warning. Equality against the file-wide extrema is
    /// exact, so several vectors can tie on the same extremum.
    pub fn detect(&self, tracking: &[TrackingEntry]) -> Result<PriorityMap> {
        let mut map = PriorityMap::default();

        for path in &self.spectrum_files {
            if !path.exists() {
                log::warn!("Spectrum file {} not found, skipping", path.display());
                continue;
            }
            let values = read_spectrum(path)?;
            if values.is_empty() {
                log::warn!("Spectrum file {} is empty, skipping", path.display());
                continue;
            }

            let max_val = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min_val = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let variable = variable_name(path);

            // Spectrum order corresponds to test-vector order; positions
            // past the tracking list have no provenance and are ignored.
            let bound = values.len().min(tracking.len());
            for (idx, &val) in values[..bound].iter().enumerate() {
                let extremum = if val == max_val {
                    Extremum::Max
                } else if val == min_val {
                    Extremum::Min
                } else {
                    continue;
                };
                map.annotate(
                    idx + 1,
                    PriorityAnnotation {
                        variable: variable.clone(),
                        extremum,
                        operator: tracking[idx].operator,
                    },
                );
            }
        }

        Ok(map)
    }
}

/// Monitored-variable label of a spectrum file: the first `_`-separated
/// token of its file name (`add_result_sp.txt` -> `add`).
fn variable_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .split('_')
        .next()
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracking(n: usize) -> Vec<TrackingEntry> {
        (1..=n)
            .map(|vector_id| TrackingEntry {
                vector_id,
                operator: Operator::Bit,
            })
            .collect()
    }

    #[test]
    fn test_extrema_detection_with_ties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("add_result_sp.txt");
        std::fs::write(&path, "1 3\n2 7\n3 1\n4 7\n").unwrap();

        let detector = PriorityDetector::new(vec![path]);
        let map = detector.detect(&tracking(4)).unwrap();

        assert_eq!(map.ids(), vec![2, 3, 4]);
        let by_id: Vec<(usize, Extremum)> = map
            .iter()
            .map(|c| (c.vector_id, c.annotations[0].extremum))
            .collect();
        assert_eq!(
            by_id,
            vec![
                (2, Extremum::Max),
                (3, Extremum::Min),
                (4, Extremum::Max),
            ]
        );
        assert_eq!(map.iter().next().unwrap().annotations[0].variable, "add");
    }

    #[test]
    fn test_missing_and_empty_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("input_a_sp.txt");
        std::fs::write(&empty, "").unwrap();
        let missing = dir.path().join("input_b_sp.txt");

        let detector = PriorityDetector::new(vec![empty, missing]);
        let map = detector.detect(&tracking(4)).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_bound_by_tracking_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multiply_sp.txt");
        // Max sits past the tracking list and must be ignored.
        std::fs::write(&path, "1 1\n2 2\n3 9\n").unwrap();

        let detector = PriorityDetector::new(vec![path]);
        let map = detector.detect(&tracking(2)).unwrap();
        assert_eq!(map.ids(), vec![1]);
        assert_eq!(map.iter().next().unwrap().annotations[0].extremum, Extremum::Min);
    }

    #[test]
    fn test_summary_lines() {
        let mut map = PriorityMap::default();
        map.annotate(
            4,
            PriorityAnnotation {
                variable: "add".to_string(),
                extremum: Extremum::Max,
                operator: Operator::Bit,
            },
        );
        map.annotate(
            4,
            PriorityAnnotation {
                variable: "divide".to_string(),
                extremum: Extremum::Min,
                operator: Operator::Bit,
            },
        );
        assert_eq!(
            map.summary_lines(),
            vec!["Test Vector 4: add (Max, bit); divide (Min, bit)"]
        );
    }
}
