use super::operators::Operator;
use crate::error::Result;
use crate::types::{format_vector, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Provenance of one applied mutation, as it appears in the mutation log.
#[derive(Debug)]
pub struct MutationRecord<'a> {
    pub original: &'a [Value],
    pub mutated: &'a [Value],
    pub operator: Operator,
    pub source_file: &'a Path,
    pub source_index: usize,
    pub priority: bool,
}

/// Append-only mutation log with a global index that is strictly increasing
/// across process restarts: opening the logger scans the existing log for
/// the highest previously recorded index and continues one past it.
pub struct MutationLogger {
    path: PathBuf,
    next_index: u64,
}

impl MutationLogger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let next_index = match std::fs::read_to_string(&path) {
            Ok(contents) => highest_recorded_index(&contents).map_or(1, |n| n + 1),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 1,
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, next_index })
    }

    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Append one record and advance the global index.
    pub fn record(&mut self, record: &MutationRecord<'_>) -> Result<()> {
        let kind = if record.priority {
            "Priority Case"
        } else {
            "Random Case"
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "Mutation {} ({}):", self.next_index, kind)?;
        writeln!(
            file,
            "Source File: {}, Index: {}",
            record.source_file.display(),
            record.source_index
        )?;
        writeln!(file, "Original: {}", format_vector(record.original))?;
        writeln!(file, "Mutated : {}", format_vector(record.mutated))?;
        writeln!(file, "Mutation Type: {}", record.operator)?;
        writeln!(file)?;

        self.next_index += 1;
        Ok(())
    }
}

/// Highest `Mutation <n>` header index in the log, if any. Accepts both the
/// `Mutation <n>:` and `Mutation <n> (<kind>):` header forms.
fn highest_recorded_index(contents: &str) -> Option<u64> {
    let mut highest = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Mutation ") {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(index) = digits.parse::<u64>() {
                highest = Some(highest.map_or(index, |h: u64| h.max(index)));
            }
        }
    }
    highest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_log_starts_at_one() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MutationLogger::open(dir.path().join("mutation.txt")).unwrap();
        assert_eq!(logger.next_index(), 1);
    }

    #[test]
    fn test_index_continues_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mutation.txt");
        std::fs::write(&path, "Mutation 7 (Random Case):\nOriginal: [1]\n\n").unwrap();

        let logger = MutationLogger::open(&path).unwrap();
        assert_eq!(logger.next_index(), 8);
    }

    #[test]
    fn test_index_accepts_bare_header_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mutation.txt");
        std::fs::write(&path, "Mutation 7: something\n").unwrap();

        let logger = MutationLogger::open(&path).unwrap();
        assert_eq!(logger.next_index(), 8);
    }

    #[test]
    fn test_record_format_and_increment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mutation.txt");
        let mut logger = MutationLogger::open(&path).unwrap();

        let original = vec![Value::Integer(1), Value::Integer(2)];
        let mutated = vec![Value::Integer(1), Value::Float(2.0)];
        logger
            .record(&MutationRecord {
                original: &original,
                mutated: &mutated,
                operator: Operator::Type,
                source_file: Path::new("seed.dat"),
                source_index: 2,
                priority: true,
            })
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Mutation 1 (Priority Case):\n\
             Source File: seed.dat, Index: 2\n\
             Original: [1, 2]\n\
             Mutated : [1, 2.0]\n\
             Mutation Type: type\n\n"
        );
        assert_eq!(logger.next_index(), 2);

        // Re-opening continues from the recorded index.
        let reopened = MutationLogger::open(&path).unwrap();
        assert_eq!(reopened.next_index(), 2);
    }
}
