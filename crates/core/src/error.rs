use thiserror::Error;

pub type TrailResult<T> = Result<T, TrailError>;

#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink error: {0}")]
    Sink(#[from] anyhow::Error),
}
