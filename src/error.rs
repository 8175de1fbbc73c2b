//! Error types for the lending core

use std::fmt;

use thiserror::Error;

/// Numeric error codes reported alongside every failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchBook = 4,
    NoSuchMember = 5,
    NoSuchLoan = 6,
    Duplicate = 8,
    BadValue = 18,
    HasLoans = 21,
}

/// Kind of entity a lookup was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Member,
    Loan,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Book => "Book",
            EntityKind::Member => "Member",
            EntityKind::Loan => "Loan",
        };
        f.write_str(name)
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn book_not_found(id: i64) -> Self {
        AppError::NotFound { kind: EntityKind::Book, id }
    }

    pub fn member_not_found(id: i64) -> Self {
        AppError::NotFound { kind: EntityKind::Member, id }
    }

    pub fn loan_not_found(id: i64) -> Self {
        AppError::NotFound { kind: EntityKind::Loan, id }
    }

    /// Error code reported to callers
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { kind: EntityKind::Book, .. } => ErrorCode::NoSuchBook,
            AppError::NotFound { kind: EntityKind::Member, .. } => ErrorCode::NoSuchMember,
            AppError::NotFound { kind: EntityKind::Loan, .. } => ErrorCode::NoSuchLoan,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::BusinessRule(_) => ErrorCode::HasLoans,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// True for failures the caller can fix by changing the request.
    /// Everything else is a fault on our side.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::Database(_) | AppError::Internal(_))
    }

    /// Classify a write failure, turning unique constraint violations into `Conflict`
    pub(crate) fn from_write(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            // 23505: unique_violation
            if db.code().as_deref() == Some("23505") {
                return AppError::Conflict(format!("{} already exists", what));
            }
            // 23503: foreign_key_violation, a referenced row went away mid-write
            if db.code().as_deref() == Some("23503") {
                return AppError::Conflict(format!("{} references a deleted record", what));
            }
        }
        tracing::error!("Database error while writing {}: {:?}", what, err);
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
