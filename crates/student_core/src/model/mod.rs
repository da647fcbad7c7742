//! Student records domain model.
//!
//! # Responsibility
//! - Define the persisted records and their insert payloads.
//! - Define explicit read models for the two sides of the one-to-one link.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never change afterwards.
//! - `StudentIdCard` owns the relationship; `Student` never stores a card id.

pub mod student;
pub mod student_id_card;
