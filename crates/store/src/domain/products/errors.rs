//! Products service errors.

use mongodb::{
    bson::document::ValueAccessError,
    error::{Error, ErrorKind, WriteFailure},
};
use thiserror::Error;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Storage(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        let duplicate = matches!(
            error.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY
        );

        if duplicate {
            return Self::AlreadyExists;
        }

        if matches!(error.kind.as_ref(), ErrorKind::BsonDeserialization(_)) {
            return Self::InvalidData;
        }

        Self::Storage(error)
    }
}

impl From<ValueAccessError> for ProductsServiceError {
    fn from(_: ValueAccessError) -> Self {
        Self::InvalidData
    }
}
