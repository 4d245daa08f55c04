use crate::engines::feedback::WeightTable;
use crate::engines::mutation::Operator;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cross-round engine state, threaded explicitly through a round and
/// persisted at its boundaries. Currently just the operator weight table;
/// the mutation log index has its own durability mechanism (the log scan).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    pub weights: WeightTable,
}

impl EngineState {
    pub fn uniform(enabled: &[Operator]) -> Self {
        Self {
            weights: WeightTable::uniform(enabled),
        }
    }

    /// Load persisted state, falling back to a uniform table when the file
    /// is absent or covers a different operator subset (the enabled set is
    /// a static configuration choice; changing it invalidates old weights).
    pub fn load_or_default<P: AsRef<Path>>(path: P, enabled: &[Operator]) -> Result<Self> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::uniform(enabled));
            }
            Err(e) => return Err(e.into()),
        };

        let state: EngineState = serde_json::from_str(&contents)?;
        if !state.weights.covers(enabled) {
            log::warn!(
                "Persisted weights in {} cover a different operator set; resetting to uniform",
                path.display()
            );
            return Ok(Self::uniform(enabled));
        }
        Ok(state)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
