use agenda_core::db::open_db_in_memory;
use agenda_core::{
    ContactDraft, ContactRepository, ContactValidationError, RepoError, SqliteContactRepository,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let mut draft = ContactDraft::new("João Silva", "123456789");
    draft.email = Some("joao.silva@example.com".to_string());
    draft.notes = Some("met at the conference".to_string());

    let created = repo.create_contact(&draft).unwrap();
    assert!(created.id > 0);
    assert!(created.created_at > 0);

    let loaded = repo.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "João Silva");
    assert_eq!(loaded.email.as_deref(), Some("joao.silva@example.com"));
    assert_eq!(loaded.phone, "123456789");
    assert_eq!(loaded.notes.as_deref(), Some("met at the conference"));
}

#[test]
fn create_assigns_increasing_ids_and_nondecreasing_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let first = repo
        .create_contact(&ContactDraft::new("Ana", "111"))
        .unwrap();
    let second = repo
        .create_contact(&ContactDraft::new("Bruno", "222"))
        .unwrap();

    assert!(second.id > first.id);
    assert!(second.created_at >= first.created_at);
}

#[test]
fn duplicate_phone_is_rejected_and_store_keeps_one_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    repo.create_contact(&ContactDraft::new("João Silva", "123456789"))
        .unwrap();

    let err = repo
        .create_contact(&ContactDraft::new("Maria Souza", "123456789"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::PhoneTaken(ref phone))
            if phone == "123456789"
    ));

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "João Silva");
}

#[test]
fn invalid_draft_blocks_create_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let err = repo
        .create_contact(&ContactDraft::new("J", "123"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::NameLength { chars: 1 })
    ));

    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn update_overwrites_mutable_fields_and_preserves_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let mut draft = ContactDraft::new("João Silva", "123456789");
    draft.email = Some("joao@example.com".to_string());
    let created = repo.create_contact(&draft).unwrap();

    let replacement = ContactDraft {
        name: "João S. Atualizado".to_string(),
        email: None,
        phone: "987654321".to_string(),
        notes: Some("new number".to_string()),
    };
    repo.update_contact(created.id, &replacement).unwrap();

    let loaded = repo.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.name, "João S. Atualizado");
    // Full replacement: the absent email clears the stored one.
    assert_eq!(loaded.email, None);
    assert_eq!(loaded.phone, "987654321");
    assert_eq!(loaded.notes.as_deref(), Some("new number"));
    assert_eq!(loaded.created_at, created.created_at);
}

#[test]
fn update_to_taken_phone_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    repo.create_contact(&ContactDraft::new("Ana", "111")).unwrap();
    let other = repo
        .create_contact(&ContactDraft::new("Bruno", "222"))
        .unwrap();

    let err = repo
        .update_contact(other.id, &ContactDraft::new("Bruno", "111"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::PhoneTaken(ref phone)) if phone == "111"
    ));

    // The losing write leaves the row untouched.
    let loaded = repo.find_by_id(other.id).unwrap().unwrap();
    assert_eq!(loaded.phone, "222");
}

#[test]
fn update_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let err = repo
        .update_contact(99999, &ContactDraft::new("Ghost", "000"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99999)));
}

#[test]
fn delete_removes_row_and_exists_reflects_it() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let created = repo
        .create_contact(&ContactDraft::new("Ana", "111"))
        .unwrap();
    assert!(repo.exists_by_id(created.id).unwrap());

    repo.delete_by_id(created.id).unwrap();
    assert!(!repo.exists_by_id(created.id).unwrap());
    assert!(repo.find_by_id(created.id).unwrap().is_none());
}

#[test]
fn find_all_returns_rows_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    assert!(repo.find_all().unwrap().is_empty());

    repo.create_contact(&ContactDraft::new("Carla", "333"))
        .unwrap();
    repo.create_contact(&ContactDraft::new("Ana", "111")).unwrap();
    repo.create_contact(&ContactDraft::new("Bruno", "222"))
        .unwrap();

    let all = repo.find_all().unwrap();
    let names: Vec<&str> = all.iter().map(|contact| contact.name.as_str()).collect();
    assert_eq!(names, vec!["Carla", "Ana", "Bruno"]);
}
