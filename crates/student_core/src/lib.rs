//! Core data model and persistence for student records.
//! Students and their identity cards live in SQLite; every constraint in the
//! schema is the single source of truth for what a valid write is.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{ConstraintKind, ConstraintViolation, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::student::{NewStudent, Student, StudentId, StudentWithCard};
pub use model::student_id_card::{
    NewStudentIdCard, StudentIdCard, StudentIdCardId, StudentIdCardWithStudent,
};
pub use repo::student_id_card_repo::{SqliteStudentIdCardRepository, StudentIdCardRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{Entity, RepoError, RepoResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
