/// Validation errors for marketplace input.
///
/// Raised when a request payload is missing required fields or carries a
/// value outside its allowed set. The HTTP layer maps every variant to a
/// 400 response carrying the `Display` text.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent, empty, or zero
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Value not in the allowed set for this field
    #[error("{field} must be one of: {allowed}")]
    InvalidVariant {
        field: &'static str,
        allowed: &'static str,
    },

    /// Numeric field must be strictly positive
    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },

    /// Request body could not be decoded
    #[error("Malformed request body: {reason}")]
    MalformedBody { reason: String },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
