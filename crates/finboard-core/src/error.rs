use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinboardError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Fixture error: {0}")]
    FixtureError(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinboardError {
    fn from(e: serde_json::Error) -> Self {
        FinboardError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for FinboardError {
    fn from(e: std::io::Error) -> Self {
        FinboardError::FixtureError(e.to_string())
    }
}
