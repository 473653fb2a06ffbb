//! Error types for the Product actor.

use crate::validation::FieldErrors;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The submitted form broke one or more field rules. Nothing was changed.
    #[error("Invalid product: {0}")]
    Validation(FieldErrors),

    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}

impl From<FieldErrors> for ProductError {
    fn from(errors: FieldErrors) -> Self {
        ProductError::Validation(errors)
    }
}

impl ProductError {
    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ProductError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
