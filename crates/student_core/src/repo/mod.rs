//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for students and their id cards.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repositories only accept connections migrated to the latest schema.
//! - Constraint violations surface unchanged as `RepoError::Db`.
//! - Missing rows on update/delete surface as `RepoError::NotFound`.

mod error;
mod rows;
mod schema;
pub mod student_id_card_repo;
pub mod student_repo;

pub use error::{Entity, RepoError, RepoResult};
