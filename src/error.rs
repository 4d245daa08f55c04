use thiserror::Error;

#[derive(Error, Debug)]
pub enum VecfuzzError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Seed data error: {0}")]
    SeedData(String),

    #[error("Spectrum error: {0}")]
    Spectrum(String),

    #[error("Mutation exhausted: operator {operator} produced no in-range vector after {attempts} attempts")]
    MutationExhausted { operator: String, attempts: usize },

    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VecfuzzError>;
