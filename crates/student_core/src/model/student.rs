//! Student domain model.
//!
//! # Responsibility
//! - Define the root learner record persisted in `student`.
//! - Provide the insert payload and the "with card" read model.
//!
//! # Invariants
//! - `id` is read-only once the record exists.
//! - `email` is unique across all students (enforced by the store).

use crate::model::student_id_card::StudentIdCard;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a student row.
pub type StudentId = i64;

/// Insert payload for a new student. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
}

impl NewStudent {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            age,
        }
    }
}

/// Persisted student record.
///
/// Loading a `Student` never loads its id card; use
/// `StudentRepository::get_student_with_card` when the card is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    first_name: String,
    last_name: String,
    email: String,
    age: i32,
}

impl Student {
    /// Builds a record for an id that already exists in the store.
    ///
    /// The id is taken on trust, as is any id read back through
    /// `Deserialize`. Passing such a record to `update_student` overwrites
    /// whichever row carries that id, so build records from repository reads
    /// unless the id is known to be right.
    pub fn with_id(id: StudentId, fields: NewStudent) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            age: fields.age,
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }
}

/// Student loaded together with its optional id card.
///
/// `card` is a read-only back-reference: the card table owns the link, so
/// changing this field is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentWithCard {
    pub student: Student,
    pub card: Option<StudentIdCard>,
}

#[cfg(test)]
mod tests {
    use super::{NewStudent, Student};

    #[test]
    fn setters_replace_mutable_fields_and_keep_id() {
        let mut student = Student::with_id(
            7,
            NewStudent::new("Ada", "Lovelace", "ada@example.com", 28),
        );

        student.set_first_name("Augusta");
        student.set_last_name("King");
        student.set_email("augusta@example.com");
        student.set_age(29);

        assert_eq!(student.id(), 7);
        assert_eq!(student.first_name(), "Augusta");
        assert_eq!(student.last_name(), "King");
        assert_eq!(student.email(), "augusta@example.com");
        assert_eq!(student.age(), 29);
    }
}
