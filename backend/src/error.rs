//! Service error handling
//!
//! This module provides unified error handling for the estimator,
//! converting internal errors to the shared error response body.

use fitlog_shared::{ErrorDetail, ErrorResponse, ParseError, ValidationError};
use thiserror::Error;
use tracing::error;

/// Error type returned by the service layer
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<ParseError> for ServiceError {
    fn from(err: ParseError) -> Self {
        ServiceError::Validation(err.into())
    }
}

impl ServiceError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the response body written back to the caller
    pub fn to_response(&self) -> ErrorResponse {
        let (message, field) = match self {
            ServiceError::Validation(err) => (err.user_message(), Some(err.field.clone())),
            ServiceError::BadRequest(msg) => (msg.clone(), None),
            ServiceError::Internal(err) => {
                error!("Internal error: {:?}", err);
                ("An internal error occurred".to_string(), None)
            }
        };

        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                field,
            },
        }
    }
}

/// Result type alias for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_response() {
        let error = ServiceError::from(ValidationError::new("steps", "cannot be negative"));
        let response = error.to_response();
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(response.error.message, "Steps: cannot be negative");
        assert_eq!(response.error.field.as_deref(), Some("steps"));
    }

    #[test]
    fn test_parse_error_becomes_validation() {
        let error = ServiceError::from(ParseError::WeightUnit("grain".to_string()));
        assert_eq!(error.code(), "VALIDATION_ERROR");
        assert_eq!(error.to_response().error.field.as_deref(), Some("weight_unit"));
    }

    #[test]
    fn test_internal_error_hides_details() {
        let error = ServiceError::from(anyhow::anyhow!("mutex poisoned at line 12"));
        let response = error.to_response();
        assert_eq!(response.error.code, "INTERNAL_ERROR");
        assert_eq!(response.error.message, "An internal error occurred");
        assert!(response.error.field.is_none());
    }
}
