//! Student id card repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide generic CRUD over `studentIdCard`, keyed by its integer id.
//! - Offer both a lazy read (card only) and an eager read (card + student).
//!
//! # Invariants
//! - Card numbers and student links are unique; the store rejects duplicates.
//! - Deleting a card never touches its student.

use crate::model::student::StudentId;
use crate::model::student_id_card::{
    NewStudentIdCard, StudentIdCard, StudentIdCardId, StudentIdCardWithStudent,
};
use crate::repo::rows::{
    count_rows, parse_card, parse_student, CARD_COLUMNS, CARD_COLUMN_COUNT, STUDENT_COLUMNS,
};
use crate::repo::schema::ensure_connection_ready;
use crate::repo::{Entity, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

/// Repository interface for student id card CRUD operations.
pub trait StudentIdCardRepository {
    /// Inserts a card and returns the id assigned by the store.
    fn create_card(&self, card: &NewStudentIdCard) -> RepoResult<StudentIdCardId>;
    /// Loads one card without its student.
    fn get_card(&self, id: StudentIdCardId) -> RepoResult<Option<StudentIdCard>>;
    /// Loads one card together with the student it belongs to.
    fn get_card_with_student(
        &self,
        id: StudentIdCardId,
    ) -> RepoResult<Option<StudentIdCardWithStudent>>;
    /// Looks up the card linked to a student, if one was issued.
    fn find_card_by_student(&self, student_id: StudentId) -> RepoResult<Option<StudentIdCard>>;
    /// Lists every card in ascending id order.
    fn list_cards(&self) -> RepoResult<Vec<StudentIdCard>>;
    /// Loads the cards whose ids are listed, in ascending id order.
    /// Unknown ids are skipped.
    fn get_cards(&self, ids: &[StudentIdCardId]) -> RepoResult<Vec<StudentIdCard>>;
    /// Replaces `card_number` and `student_id` of an existing card.
    fn update_card(&self, card: &StudentIdCard) -> RepoResult<()>;
    /// Deletes one card by id.
    fn delete_card(&self, id: StudentIdCardId) -> RepoResult<()>;
    /// Deletes every card and returns how many were removed. Students stay.
    fn delete_all_cards(&self) -> RepoResult<u64>;
    fn count_cards(&self) -> RepoResult<u64>;
    fn card_exists(&self, id: StudentIdCardId) -> RepoResult<bool>;
}

/// SQLite-backed student id card repository.
pub struct SqliteStudentIdCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentIdCardRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentIdCardRepository for SqliteStudentIdCardRepository<'_> {
    fn create_card(&self, card: &NewStudentIdCard) -> RepoResult<StudentIdCardId> {
        self.conn.execute(
            "INSERT INTO studentIdCard (card_number, student_id) VALUES (?1, ?2);",
            params![card.card_number.as_str(), card.student_id],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=card_create module=repo status=ok card_id={id} student_id={}",
            card.student_id
        );
        Ok(id)
    }

    fn get_card(&self, id: StudentIdCardId) -> RepoResult<Option<StudentIdCard>> {
        let card = self
            .conn
            .query_row(
                &format!("SELECT {CARD_COLUMNS} FROM studentIdCard c WHERE c.id = ?1;"),
                [id],
                |row| parse_card(row, 0),
            )
            .optional()?;
        Ok(card)
    }

    fn get_card_with_student(
        &self,
        id: StudentIdCardId,
    ) -> RepoResult<Option<StudentIdCardWithStudent>> {
        let loaded = self
            .conn
            .query_row(
                &format!(
                    "SELECT {CARD_COLUMNS}, {STUDENT_COLUMNS}
                     FROM studentIdCard c
                     INNER JOIN student s ON s.id = c.student_id
                     WHERE c.id = ?1;"
                ),
                [id],
                |row| {
                    Ok(StudentIdCardWithStudent {
                        card: parse_card(row, 0)?,
                        student: parse_student(row, CARD_COLUMN_COUNT)?,
                    })
                },
            )
            .optional()?;
        Ok(loaded)
    }

    fn find_card_by_student(&self, student_id: StudentId) -> RepoResult<Option<StudentIdCard>> {
        let card = self
            .conn
            .query_row(
                &format!("SELECT {CARD_COLUMNS} FROM studentIdCard c WHERE c.student_id = ?1;"),
                [student_id],
                |row| parse_card(row, 0),
            )
            .optional()?;
        Ok(card)
    }

    fn list_cards(&self) -> RepoResult<Vec<StudentIdCard>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CARD_COLUMNS} FROM studentIdCard c ORDER BY c.id ASC;"))?;
        let cards = stmt
            .query_map([], |row| parse_card(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    fn get_cards(&self, ids: &[StudentIdCardId]) -> RepoResult<Vec<StudentIdCard>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CARD_COLUMNS}
             FROM studentIdCard c
             WHERE c.id IN ({placeholders})
             ORDER BY c.id ASC;"
        ))?;
        let cards = stmt
            .query_map(params_from_iter(ids), |row| parse_card(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    fn update_card(&self, card: &StudentIdCard) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE studentIdCard
             SET
                card_number = ?2,
                student_id = ?3
             WHERE id = ?1;",
            params![card.id(), card.card_number(), card.student_id()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(Entity::StudentIdCard, card.id()));
        }

        debug!(
            "event=card_update module=repo status=ok card_id={}",
            card.id()
        );
        Ok(())
    }

    fn delete_card(&self, id: StudentIdCardId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM studentIdCard WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(Entity::StudentIdCard, id));
        }

        debug!("event=card_delete module=repo status=ok card_id={id}");
        Ok(())
    }

    fn delete_all_cards(&self) -> RepoResult<u64> {
        let deleted = self.conn.execute("DELETE FROM studentIdCard;", [])?;
        debug!("event=card_delete_all module=repo status=ok cards_deleted={deleted}");
        Ok(deleted as u64)
    }

    fn count_cards(&self) -> RepoResult<u64> {
        count_rows(self.conn, "studentIdCard")
    }

    fn card_exists(&self, id: StudentIdCardId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM studentIdCard WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}
