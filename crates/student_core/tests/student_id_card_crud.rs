use rusqlite::Connection;
use student_core::db::{open_db, open_db_in_memory};
use student_core::{
    ConstraintKind, Entity, NewStudent, NewStudentIdCard, RepoError,
    SqliteStudentIdCardRepository, SqliteStudentRepository, StudentId, StudentIdCardRepository,
    StudentRepository,
};

fn create_student(conn: &Connection, email: &str) -> StudentId {
    SqliteStudentRepository::try_new(conn)
        .unwrap()
        .create_student(&NewStudent::new("Ada", "Lovelace", email, 28))
        .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let student_id = create_student(&conn, "ada@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let id = repo
        .create_card(&NewStudentIdCard::new("C-1001", student_id))
        .unwrap();
    assert_eq!(id, 1);

    let card = repo.get_card(id).unwrap().unwrap();
    assert_eq!(card.id(), id);
    assert_eq!(card.card_number(), "C-1001");
    assert_eq!(card.student_id(), student_id);
    assert!(repo.card_exists(id).unwrap());
}

#[test]
fn get_with_student_loads_owner() {
    let conn = open_db_in_memory().unwrap();
    let student_id = create_student(&conn, "ada@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let id = repo
        .create_card(&NewStudentIdCard::new("C-1001", student_id))
        .unwrap();

    let loaded = repo.get_card_with_student(id).unwrap().unwrap();
    assert_eq!(loaded.card.id(), id);
    assert_eq!(loaded.student.id(), student_id);
    assert_eq!(loaded.student.email(), "ada@example.com");

    assert!(repo.get_card_with_student(id + 1).unwrap().is_none());
}

#[test]
fn second_card_for_same_student_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let student_id = create_student(&conn, "ada@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    repo.create_card(&NewStudentIdCard::new("C-1001", student_id))
        .unwrap();
    let err = repo
        .create_card(&NewStudentIdCard::new("C-1002", student_id))
        .unwrap_err();

    assert!(err.is_unique_violation());
    assert!(err
        .constraint()
        .unwrap()
        .targets("studentIdCard", "student_id"));
    assert_eq!(repo.count_cards().unwrap(), 1);
}

#[test]
fn duplicate_card_number_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let first = create_student(&conn, "ada@example.com");
    let second = create_student(&conn, "grace@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    repo.create_card(&NewStudentIdCard::new("C-1001", first))
        .unwrap();
    let err = repo
        .create_card(&NewStudentIdCard::new("C-1001", second))
        .unwrap_err();

    assert!(err.is_unique_violation());
    assert!(err
        .constraint()
        .unwrap()
        .targets("studentIdCard", "card_number"));
    assert!(repo.find_card_by_student(second).unwrap().is_none());
}

#[test]
fn card_for_missing_student_is_rejected_as_foreign_key_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let err = repo
        .create_card(&NewStudentIdCard::new("C-1001", 99))
        .unwrap_err();

    assert!(err.is_foreign_key_violation());
    assert_eq!(repo.count_cards().unwrap(), 0);
}

#[test]
fn update_replaces_number_and_owner() {
    let conn = open_db_in_memory().unwrap();
    let first = create_student(&conn, "ada@example.com");
    let second = create_student(&conn, "grace@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let id = repo
        .create_card(&NewStudentIdCard::new("C-1001", first))
        .unwrap();
    let mut card = repo.get_card(id).unwrap().unwrap();
    card.set_card_number("C-2001");
    card.set_student_id(second);
    repo.update_card(&card).unwrap();

    assert_eq!(repo.get_card(id).unwrap().unwrap(), card);
    assert!(repo.find_card_by_student(first).unwrap().is_none());
    assert_eq!(repo.find_card_by_student(second).unwrap().unwrap().id(), id);
}

#[test]
fn update_to_missing_or_linked_student_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let first = create_student(&conn, "ada@example.com");
    let second = create_student(&conn, "grace@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let first_card = repo
        .create_card(&NewStudentIdCard::new("C-1001", first))
        .unwrap();
    repo.create_card(&NewStudentIdCard::new("C-1002", second))
        .unwrap();

    let mut card = repo.get_card(first_card).unwrap().unwrap();
    card.set_student_id(second);
    let err = repo.update_card(&card).unwrap_err();
    assert_eq!(err.constraint().unwrap().kind, ConstraintKind::Unique);

    card.set_student_id(99);
    let err = repo.update_card(&card).unwrap_err();
    assert_eq!(err.constraint().unwrap().kind, ConstraintKind::ForeignKey);

    assert_eq!(repo.get_card(first_card).unwrap().unwrap().student_id(), first);
}

#[test]
fn delete_card_keeps_student() {
    let conn = open_db_in_memory().unwrap();
    let student_id = create_student(&conn, "ada@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();
    let students = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo
        .create_card(&NewStudentIdCard::new("C-1001", student_id))
        .unwrap();
    repo.delete_card(id).unwrap();

    assert!(repo.get_card(id).unwrap().is_none());
    assert!(!repo.card_exists(id).unwrap());
    assert!(students.get_student(student_id).unwrap().is_some());
    assert!(students
        .get_student_with_card(student_id)
        .unwrap()
        .unwrap()
        .card
        .is_none());
}

#[test]
fn update_and_delete_missing_card_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let student_id = create_student(&conn, "ada@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let id = repo
        .create_card(&NewStudentIdCard::new("C-1001", student_id))
        .unwrap();
    let card = repo.get_card(id).unwrap().unwrap();
    repo.delete_card(id).unwrap();

    assert!(matches!(
        repo.update_card(&card),
        Err(RepoError::NotFound(Entity::StudentIdCard, missing)) if missing == id
    ));
    assert!(matches!(
        repo.delete_card(id),
        Err(RepoError::NotFound(Entity::StudentIdCard, missing)) if missing == id
    ));
}

#[test]
fn list_cards_orders_by_id() {
    let conn = open_db_in_memory().unwrap();
    let first = create_student(&conn, "ada@example.com");
    let second = create_student(&conn, "grace@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let b = repo
        .create_card(&NewStudentIdCard::new("C-2000", second))
        .unwrap();
    let a = repo
        .create_card(&NewStudentIdCard::new("C-1000", first))
        .unwrap();

    let numbers: Vec<_> = repo
        .list_cards()
        .unwrap()
        .into_iter()
        .map(|card| (card.id(), card.card_number().to_string()))
        .collect();
    assert_eq!(
        numbers,
        vec![(b, "C-2000".to_string()), (a, "C-1000".to_string())]
    );
}

#[test]
fn get_cards_returns_requested_ids_in_order() {
    let conn = open_db_in_memory().unwrap();
    let first = create_student(&conn, "ada@example.com");
    let second = create_student(&conn, "grace@example.com");
    let third = create_student(&conn, "alan@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();

    let a = repo
        .create_card(&NewStudentIdCard::new("C-1001", first))
        .unwrap();
    repo.create_card(&NewStudentIdCard::new("C-1002", second))
        .unwrap();
    let c = repo
        .create_card(&NewStudentIdCard::new("C-1003", third))
        .unwrap();

    let ids: Vec<_> = repo
        .get_cards(&[c, 99, a])
        .unwrap()
        .iter()
        .map(|card| card.id())
        .collect();
    assert_eq!(ids, vec![a, c]);
    assert!(repo.get_cards(&[]).unwrap().is_empty());
}

#[test]
fn delete_all_cards_keeps_students() {
    let conn = open_db_in_memory().unwrap();
    let first = create_student(&conn, "ada@example.com");
    let second = create_student(&conn, "grace@example.com");
    let repo = SqliteStudentIdCardRepository::try_new(&conn).unwrap();
    let students = SqliteStudentRepository::try_new(&conn).unwrap();

    repo.create_card(&NewStudentIdCard::new("C-1001", first))
        .unwrap();
    repo.create_card(&NewStudentIdCard::new("C-1002", second))
        .unwrap();

    assert_eq!(repo.delete_all_cards().unwrap(), 2);
    assert_eq!(repo.count_cards().unwrap(), 0);
    assert_eq!(students.count_students().unwrap(), 2);
    assert_eq!(repo.delete_all_cards().unwrap(), 0);
}

#[test]
fn second_connection_cannot_link_already_linked_student() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    let conn_a = open_db(&path).unwrap();
    let conn_b = open_db(&path).unwrap();
    let student_id = create_student(&conn_a, "ada@example.com");

    let cards_a = SqliteStudentIdCardRepository::try_new(&conn_a).unwrap();
    let cards_b = SqliteStudentIdCardRepository::try_new(&conn_b).unwrap();

    cards_a
        .create_card(&NewStudentIdCard::new("C-1001", student_id))
        .unwrap();
    let err = cards_b
        .create_card(&NewStudentIdCard::new("C-1002", student_id))
        .unwrap_err();

    assert!(err.is_unique_violation());
    assert!(err
        .constraint()
        .unwrap()
        .targets("studentIdCard", "student_id"));
    assert_eq!(cards_a.count_cards().unwrap(), 1);
}
