use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("demand parse error: {0}")]
    Parse(String),

    #[error("demand configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DemandResult<T> = Result<T, DemandError>;
