//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `student`, keyed by its integer id.
//! - Let callers choose between loading a student with or without its card.
//! - Own the cascade from a student to its dependent card on create and delete.
//!
//! # Invariants
//! - `create_student_with_card` inserts both rows in one IMMEDIATE
//!   transaction; on any failure neither row is stored.
//! - `delete_student` removes the card and the student in one IMMEDIATE
//!   transaction; on any failure neither row is removed.
//! - Updates never write `id`.

use crate::model::student::{NewStudent, Student, StudentId, StudentWithCard};
use crate::model::student_id_card::StudentIdCardId;
use crate::repo::rows::{
    count_rows, parse_optional_card, parse_student, CARD_COLUMNS, STUDENT_COLUMNS,
    STUDENT_COLUMN_COUNT,
};
use crate::repo::schema::ensure_connection_ready;
use crate::repo::{Entity, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Inserts a student and returns the id assigned by the store.
    fn create_student(&self, student: &NewStudent) -> RepoResult<StudentId>;
    /// Inserts a student and its id card as one unit of work.
    fn create_student_with_card(
        &self,
        student: &NewStudent,
        card_number: &str,
    ) -> RepoResult<(StudentId, StudentIdCardId)>;
    /// Loads one student without touching the card table.
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Loads one student together with its card, if any.
    fn get_student_with_card(&self, id: StudentId) -> RepoResult<Option<StudentWithCard>>;
    /// Lists every student in ascending id order.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Replaces all mutable fields of an existing student.
    fn update_student(&self, student: &Student) -> RepoResult<()>;
    /// Deletes a student and, first, the card linked to it.
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
    fn count_students(&self) -> RepoResult<u64>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, student: &NewStudent) -> RepoResult<StudentId> {
        let id = insert_student(self.conn, student)?;
        debug!("event=student_create module=repo status=ok student_id={id}");
        Ok(id)
    }

    fn create_student_with_card(
        &self,
        student: &NewStudent,
        card_number: &str,
    ) -> RepoResult<(StudentId, StudentIdCardId)> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let student_id = insert_student(&tx, student)?;
        tx.execute(
            "INSERT INTO studentIdCard (card_number, student_id) VALUES (?1, ?2);",
            params![card_number, student_id],
        )?;
        let card_id = tx.last_insert_rowid();

        tx.commit()?;
        debug!(
            "event=student_create module=repo status=ok student_id={student_id} card_id={card_id}"
        );
        Ok((student_id, card_id))
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("SELECT {STUDENT_COLUMNS} FROM student s WHERE s.id = ?1;"),
                [id],
                |row| parse_student(row, 0),
            )
            .optional()?;
        Ok(student)
    }

    fn get_student_with_card(&self, id: StudentId) -> RepoResult<Option<StudentWithCard>> {
        let loaded = self
            .conn
            .query_row(
                &format!(
                    "SELECT {STUDENT_COLUMNS}, {CARD_COLUMNS}
                     FROM student s
                     LEFT JOIN studentIdCard c ON c.student_id = s.id
                     WHERE s.id = ?1;"
                ),
                [id],
                |row| {
                    Ok(StudentWithCard {
                        student: parse_student(row, 0)?,
                        card: parse_optional_card(row, STUDENT_COLUMN_COUNT)?,
                    })
                },
            )
            .optional()?;
        Ok(loaded)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {STUDENT_COLUMNS} FROM student s ORDER BY s.id ASC;"))?;
        let students = stmt
            .query_map([], |row| parse_student(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }

    fn update_student(&self, student: &Student) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE student
             SET
                first_name = ?2,
                last_name = ?3,
                email = ?4,
                age = ?5
             WHERE id = ?1;",
            params![
                student.id(),
                student.first_name(),
                student.last_name(),
                student.email(),
                student.age(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(Entity::Student, student.id()));
        }

        debug!(
            "event=student_update module=repo status=ok student_id={}",
            student.id()
        );
        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let cards_deleted = tx.execute("DELETE FROM studentIdCard WHERE student_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM student WHERE id = ?1;", [id])?;
        if changed == 0 {
            // Dropping `tx` rolls back.
            return Err(RepoError::NotFound(Entity::Student, id));
        }

        tx.commit()?;
        debug!(
            "event=student_delete module=repo status=ok student_id={id} cards_deleted={cards_deleted}"
        );
        Ok(())
    }

    fn count_students(&self) -> RepoResult<u64> {
        count_rows(self.conn, "student")
    }
}

fn insert_student(conn: &Connection, student: &NewStudent) -> RepoResult<StudentId> {
    conn.execute(
        "INSERT INTO student (first_name, last_name, email, age)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            student.first_name.as_str(),
            student.last_name.as_str(),
            student.email.as_str(),
            student.age,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
