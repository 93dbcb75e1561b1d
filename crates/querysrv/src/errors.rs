use axum::http::StatusCode;

use crate::response::QueryResponse;

/// Failure classes for the request pipeline, in stage order.
///
/// Every failure converts to a response envelope at the handler boundary;
/// nothing propagates to the framework as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum SrvError {
    #[error("No question provided")]
    EmptyQuestion,

    #[error("Only SELECT queries are allowed")]
    DisallowedQuery { sql: String },

    #[error("Language model API error: {0}")]
    Translation(#[from] sqlgen::errors::SqlGenError),

    #[error("Database error: {source}")]
    Store {
        sql: String,
        source: mysqlexec::errors::ExecError,
    },
}

impl SrvError {
    /// HTTP status for the failure class: caller-fixable input and gate
    /// issues are 400, backend failures 500.
    pub fn status(&self) -> StatusCode {
        match self {
            SrvError::EmptyQuestion | SrvError::DisallowedQuery { .. } => StatusCode::BAD_REQUEST,
            SrvError::Translation(_) | SrvError::Store { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The statement echoed in the envelope, when one existed at failure
    /// time.
    pub fn statement(self) -> Option<String> {
        match self {
            SrvError::DisallowedQuery { sql } | SrvError::Store { sql, .. } => Some(sql),
            SrvError::EmptyQuestion | SrvError::Translation(_) => None,
        }
    }

    pub fn into_response_parts(self) -> (StatusCode, QueryResponse) {
        let status = self.status();
        let message = self.to_string();
        (status, QueryResponse::failure(message, self.statement()))
    }
}

pub type Result<T, E = SrvError> = std::result::Result<T, E>;
