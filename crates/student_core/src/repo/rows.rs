//! Row mapping shared by both repositories.
//!
//! # Responsibility
//! - Own the column lists selected for students and cards.
//! - Map rows into model records.
//!
//! # Invariants
//! - Join queries select the student columns and card columns side by side,
//!   so each parser reads from a starting column index.
//! - `*_COLUMN_COUNT` matches the number of names in `*_COLUMNS`.

use crate::model::student::{NewStudent, Student};
use crate::model::student_id_card::{NewStudentIdCard, StudentIdCard};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, Row};

pub(crate) const STUDENT_COLUMNS: &str = "s.id, s.first_name, s.last_name, s.email, s.age";
pub(crate) const STUDENT_COLUMN_COUNT: usize = 5;
pub(crate) const CARD_COLUMNS: &str = "c.id, c.card_number, c.student_id";
pub(crate) const CARD_COLUMN_COUNT: usize = 3;

pub(crate) fn parse_student(row: &Row<'_>, start: usize) -> rusqlite::Result<Student> {
    Ok(Student::with_id(
        row.get(start)?,
        NewStudent {
            first_name: row.get(start + 1)?,
            last_name: row.get(start + 2)?,
            email: row.get(start + 3)?,
            age: row.get(start + 4)?,
        },
    ))
}

pub(crate) fn parse_card(row: &Row<'_>, start: usize) -> rusqlite::Result<StudentIdCard> {
    Ok(StudentIdCard::with_id(
        row.get(start)?,
        NewStudentIdCard {
            card_number: row.get(start + 1)?,
            student_id: row.get(start + 2)?,
        },
    ))
}

/// Parses the card half of a `LEFT JOIN`; a NULL card id means "no card".
pub(crate) fn parse_optional_card(
    row: &Row<'_>,
    start: usize,
) -> rusqlite::Result<Option<StudentIdCard>> {
    match row.get::<_, Option<i64>>(start)? {
        Some(_) => parse_card(row, start).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> RepoResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM \"{table}\";"), [], |row| {
        row.get(0)
    })?;
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}` in {table}")))
}
