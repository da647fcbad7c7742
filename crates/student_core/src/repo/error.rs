//! Repository error types.
//!
//! # Responsibility
//! - Give callers one error type for every repository operation.
//! - Expose the store constraint behind a rejected write.
//!
//! # Invariants
//! - Constraint violations are carried unchanged inside `RepoError::Db`.
//! - `NotFound` names the entity and id that was missing.

use crate::db::{ConstraintKind, ConstraintViolation, DbError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persisted entity named by a `NotFound` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Student,
    StudentIdCard,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::StudentIdCard => write!(f, "student id card"),
        }
    }
}

/// Repository error for student record persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(Entity, i64),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns the store constraint that rejected the write, if any.
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Db(err) => err.constraint(),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.constraint()
            .is_some_and(|violation| violation.kind == ConstraintKind::Unique)
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.constraint()
            .is_some_and(|violation| violation.kind == ConstraintKind::ForeignKey)
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(entity, id) => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}
