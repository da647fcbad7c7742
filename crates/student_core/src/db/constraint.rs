//! Typed view over SQLite constraint failures.
//!
//! SQLite reports every constraint failure as `SQLITE_CONSTRAINT` and puts
//! the precise kind in the extended result code. The offending column is only
//! available in the message text (`UNIQUE constraint failed: student.email`).

use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Constraint family reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    NotNull,
    Unique,
    ForeignKey,
    PrimaryKey,
    Check,
    /// Trigger aborts and any code not listed above.
    Other,
}

impl ConstraintKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::Unique => "unique",
            Self::ForeignKey => "foreign_key",
            Self::PrimaryKey => "primary_key",
            Self::Check => "check",
            Self::Other => "other",
        }
    }
}

/// A write rejected by a schema constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    /// Table named by SQLite, when the message carries one.
    pub table: Option<String>,
    /// First column named by SQLite, when the message carries one.
    pub column: Option<String>,
    /// Raw SQLite message.
    pub message: String,
}

impl ConstraintViolation {
    /// Classifies a rusqlite error, returning `None` for non-constraint failures.
    pub fn from_sqlite(err: &rusqlite::Error) -> Option<Self> {
        let rusqlite::Error::SqliteFailure(failure, message) = err else {
            return None;
        };
        if failure.code != rusqlite::ErrorCode::ConstraintViolation {
            return None;
        }

        let kind = match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
            ffi::SQLITE_CONSTRAINT_UNIQUE => ConstraintKind::Unique,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::PrimaryKey,
            ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
            _ => ConstraintKind::Other,
        };
        let message = message.clone().unwrap_or_else(|| failure.to_string());
        let (table, column) = parse_target(&message);

        Some(Self {
            kind,
            table,
            column,
            message,
        })
    }

    /// Returns whether this violation names `table.column`.
    pub fn targets(&self, table: &str, column: &str) -> bool {
        self.table.as_deref() == Some(table) && self.column.as_deref() == Some(column)
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} constraint violation: {}", self.kind.as_str(), self.message)
    }
}

impl Error for ConstraintViolation {}

// "UNIQUE constraint failed: studentIdCard.student_id"
// "NOT NULL constraint failed: student.email"
// Composite keys list several `table.column` pairs; the first one wins.
fn parse_target(message: &str) -> (Option<String>, Option<String>) {
    let Some((_, target)) = message.split_once("constraint failed: ") else {
        return (None, None);
    };
    let first = target.split(',').next().unwrap_or_default().trim();
    match first.split_once('.') {
        Some((table, column)) if !table.is_empty() && !column.is_empty() => {
            (Some(table.to_string()), Some(column.to_string()))
        }
        _ => (None, None),
    }
}
