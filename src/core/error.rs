use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopsimError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dying curve must have exactly {expected} entries, got {actual}")]
    InvalidCurveLength { expected: usize, actual: usize },

    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PopsimError>;
