use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Structural problem with the batch itself, raised before any scoring.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
