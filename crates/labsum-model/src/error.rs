use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no lab text has been parsed yet")]
    NotParsed,
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
