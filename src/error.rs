// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use thiserror::Error;

pub type SummaryResult<T> = std::result::Result<T, SummaryError>;

/// Errors raised by the summary core. Domain variants are recoverable and
/// map to client errors at the boundary; the rest abort the current operation.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: String, value: String },

    #[error("No transaction found for customer id:{0}")]
    NotFound(String),

    #[error("Invalid Transaction field values [{0}]")]
    InvalidTransaction(String),

    #[error("Schema check failed: {0}")]
    Schema(String),

    #[error("Counter for collection '{0}' could not be advanced")]
    Counter(String),

    #[error("Transaction id '{0}' is already taken")]
    DuplicateId(String),

    #[error("Balance for customer id:{0} is out of range")]
    BalanceOverflow(String),

    #[error("Store failure: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store connection lock poisoned")]
    Poisoned,
}

impl SummaryError {
    pub fn invalid_parameter(name: &str, value: &str) -> Self {
        SummaryError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn status(&self) -> ErrorStatus {
        match self {
            SummaryError::InvalidParameter { .. } | SummaryError::InvalidTransaction(_) => {
                ErrorStatus::BadRequest
            }
            SummaryError::NotFound(_) => ErrorStatus::NotFound,
            _ => ErrorStatus::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorStatus {
    /// HTTP-equivalent status for callers that expose the core over the wire.
    pub fn http_code(self) -> u16 {
        match self {
            ErrorStatus::BadRequest => 400,
            ErrorStatus::NotFound => 404,
            ErrorStatus::Internal => 500,
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            ErrorStatus::BadRequest => 2,
            ErrorStatus::NotFound => 3,
            ErrorStatus::Internal => 1,
        }
    }
}

/// Structured error body handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub logref: String,
    pub message: String,
}

impl From<&SummaryError> for ErrorBody {
    fn from(err: &SummaryError) -> Self {
        ErrorBody {
            logref: "error".to_string(),
            message: err.to_string(),
        }
    }
}
