use contacts_core::db::open_db_in_memory;
use contacts_core::{Contact, ContactRepository, RepoError, SqliteContactRepository};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo
        .create_contact(&Contact::new("A", "a@x.com", "1"))
        .unwrap();

    let loaded = repo.get_contact(id).unwrap();
    assert_eq!(loaded, Contact::with_id(id, "A", "a@x.com", "1"));
    assert!(loaded.is_persisted());
}

#[test]
fn create_ignores_caller_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo
        .create_contact(&Contact::with_id(4242, "A", "a@x.com", "1"))
        .unwrap();

    assert_ne!(id, 4242);
    assert_eq!(
        repo.get_contact(4242).unwrap_err().to_string(),
        "contact not found with ID 4242"
    );
}

#[test]
fn create_assigns_increasing_ids_that_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let first = repo.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();
    let second = repo.create_contact(&Contact::new("B", "b@x.com", "2")).unwrap();
    assert!(second > first);

    repo.delete_contact(second).unwrap();
    let third = repo.create_contact(&Contact::new("C", "c@x.com", "3")).unwrap();
    assert!(third > second);
}

#[test]
fn list_empty_table_returns_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    assert!(repo.list_contacts().unwrap().is_empty());
}

#[test]
fn list_returns_all_rows_in_store_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let a = repo.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();
    let b = repo.create_contact(&Contact::new("B", "b@x.com", "2")).unwrap();
    let c = repo.create_contact(&Contact::new("C", "c@x.com", "3")).unwrap();

    let ids: Vec<_> = repo
        .list_contacts()
        .unwrap()
        .into_iter()
        .map(|contact| contact.id)
        .collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn get_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let err = repo.get_contact(999_999).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999_999)));
    assert!(err.is_not_found());
}

#[test]
fn update_replaces_all_fields_and_echoes_input() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();
    let changed = Contact::with_id(id, "B", "b@x.com", "2");

    let echoed = repo.update_contact(&changed).unwrap();
    assert_eq!(echoed, changed);
    assert_eq!(repo.get_contact(id).unwrap(), changed);
}

#[test]
fn update_missing_returns_not_found_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();
    let before = repo.list_contacts().unwrap();

    let err = repo
        .update_contact(&Contact::with_id(id + 1000, "B", "b@x.com", "2"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id + 1000));
    assert_eq!(repo.list_contacts().unwrap(), before);
}

#[test]
fn delete_then_get_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();
    assert_eq!(repo.delete_contact(id).unwrap(), id);

    assert!(matches!(repo.get_contact(id), Err(RepoError::NotFound(missing)) if missing == id));
    assert!(repo.list_contacts().unwrap().is_empty());
}

#[test]
fn delete_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    repo.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();

    let err = repo.delete_contact(999_999).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999_999)));
    assert_eq!(repo.list_contacts().unwrap().len(), 1);
}

#[test]
fn undecodable_row_surfaces_query_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contact (name, email, phone) VALUES (X'00FF', 'a@x.com', '1');",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    let repo = SqliteContactRepository::new(&conn);

    let list_err = repo.list_contacts().unwrap_err();
    assert!(matches!(list_err, RepoError::Query { context: "scanning row", .. }));

    let get_err = repo.get_contact(id).unwrap_err();
    assert!(matches!(get_err, RepoError::Query { .. }));
    assert!(!get_err.is_not_found());
}

#[test]
fn missing_table_surfaces_query_errors() {
    let conn = Connection::open_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    assert!(matches!(
        repo.list_contacts(),
        Err(RepoError::Query { context: "executing query", .. })
    ));
    assert!(matches!(
        repo.get_contact(1),
        Err(RepoError::Query { context: "retrieving contact", .. })
    ));
    assert!(matches!(
        repo.create_contact(&Contact::new("A", "a@x.com", "1")),
        Err(RepoError::Query { context: "executing insert", .. })
    ));
    assert!(matches!(
        repo.update_contact(&Contact::with_id(1, "A", "a@x.com", "1")),
        Err(RepoError::Query { context: "executing update", .. })
    ));
    assert!(matches!(
        repo.delete_contact(1),
        Err(RepoError::Query { context: "executing delete", .. })
    ));
}

#[test]
fn query_error_exposes_store_error_as_source() {
    let conn = Connection::open_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let err = repo.list_contacts().unwrap_err();
    let source = std::error::Error::source(&err).expect("query errors carry a source");
    assert!(source.to_string().contains("no such table"));
    assert!(err.to_string().starts_with("error executing query:"));
}

#[test]
fn repositories_on_separate_handles_are_isolated() {
    let conn_a = open_db_in_memory().unwrap();
    let conn_b = open_db_in_memory().unwrap();
    let repo_a = SqliteContactRepository::new(&conn_a);
    let repo_b = SqliteContactRepository::new(&conn_b);

    repo_a.create_contact(&Contact::new("A", "a@x.com", "1")).unwrap();

    assert_eq!(repo_a.list_contacts().unwrap().len(), 1);
    assert!(repo_b.list_contacts().unwrap().is_empty());
}
