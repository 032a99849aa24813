#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("patient not found")]
    NotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("document store failure: {0}")]
    Storage(#[from] mongodb::error::Error),
    #[error("failed to encode patient document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
    #[error("failed to decode patient document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
