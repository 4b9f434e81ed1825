use thiserror::Error;

/// Why a string could not be read as an [`ObjectId`](crate::ObjectId).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("object id is not hexadecimal: {0}")]
    NotHex(String),

    #[error("object id must be {expected} bytes, found {found}")]
    WrongLength { expected: usize, found: usize },
}
