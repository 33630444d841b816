use thiserror::Error;

/// Errors that can occur in the extraction stage.
///
/// Extraction itself is total over any input text; only configuration can be
/// invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid extract configuration: {0}")]
    InvalidConfig(String),
}
