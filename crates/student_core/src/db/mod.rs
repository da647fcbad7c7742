//! SQLite storage bootstrap, schema migrations and constraint reporting.
//!
//! # Responsibility
//! - Open and configure SQLite connections for student records.
//! - Apply schema migrations in deterministic order.
//! - Translate SQLite constraint failures into typed violations.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Every returned connection enforces foreign keys.
//! - Constraint failures are never retried or masked; they surface as
//!   `DbError::Constraint`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod constraint;
pub mod migrations;
mod open;

pub use constraint::{ConstraintKind, ConstraintViolation};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Constraint(ConstraintViolation),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns the constraint violation carried by this error, if any.
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint(violation) => Some(violation),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Constraint(violation) => write!(f, "{violation}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Constraint(violation) => Some(violation),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        match ConstraintViolation::from_sqlite(&value) {
            Some(violation) => Self::Constraint(violation),
            None => Self::Sqlite(value),
        }
    }
}
