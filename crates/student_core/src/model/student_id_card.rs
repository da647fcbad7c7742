//! Student identity card model.
//!
//! # Responsibility
//! - Define the dependent record persisted in `studentIdCard`.
//! - Carry the owning foreign key (`student_id`) of the one-to-one link.
//!
//! # Invariants
//! - `card_number` is unique across all cards.
//! - `student_id` references an existing student and is unique, so a student
//!   holds at most one card.

use crate::model::student::{Student, StudentId};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a card row.
pub type StudentIdCardId = i64;

/// Insert payload for a new card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudentIdCard {
    pub card_number: String,
    pub student_id: StudentId,
}

impl NewStudentIdCard {
    pub fn new(card_number: impl Into<String>, student_id: StudentId) -> Self {
        Self {
            card_number: card_number.into(),
            student_id,
        }
    }
}

/// Persisted card record holding the foreign key to its student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdCard {
    id: StudentIdCardId,
    card_number: String,
    student_id: StudentId,
}

impl StudentIdCard {
    /// Builds a record for an id that already exists in the store.
    ///
    /// The id is not checked here or on deserialization; `update_card`
    /// writes to whichever row carries it.
    pub fn with_id(id: StudentIdCardId, fields: NewStudentIdCard) -> Self {
        Self {
            id,
            card_number: fields.card_number,
            student_id: fields.student_id,
        }
    }

    pub fn id(&self) -> StudentIdCardId {
        self.id
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn set_card_number(&mut self, card_number: impl Into<String>) {
        self.card_number = card_number.into();
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    /// Re-points the card at another student. Persisted on update.
    pub fn set_student_id(&mut self, student_id: StudentId) {
        self.student_id = student_id;
    }
}

/// Card loaded together with the student it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdCardWithStudent {
    pub card: StudentIdCard,
    pub student: Student,
}
