use super::{
    feedback::FeedbackConfig, mutation::MutationConfig, traits::ConfigSection,
    workspace::WorkspaceConfig,
};
use crate::error::VecfuzzError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mutation: MutationConfig,
    pub feedback: FeedbackConfig,
    pub workspace: WorkspaceConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), VecfuzzError> {
        self.mutation.validate()?;
        self.feedback.validate()?;
        self.workspace.validate()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, VecfuzzError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VecfuzzError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| VecfuzzError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), VecfuzzError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| VecfuzzError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| VecfuzzError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
