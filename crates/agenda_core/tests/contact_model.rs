use agenda_core::{Contact, ContactDraft};

#[test]
fn contact_serializes_with_expected_field_names() {
    let contact = Contact {
        id: 1,
        name: "João Silva".to_string(),
        email: Some("joao.silva@example.com".to_string()),
        phone: "123456789".to_string(),
        notes: None,
        created_at: 1_756_000_000_000,
    };

    let value = serde_json::to_value(&contact).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["name"], "João Silva");
    assert_eq!(value["email"], "joao.silva@example.com");
    assert_eq!(value["phone"], "123456789");
    assert_eq!(value["notes"], serde_json::Value::Null);
    assert_eq!(value["created_at"], 1_756_000_000_000_i64);
}

#[test]
fn draft_deserializes_from_request_payload() {
    let draft: ContactDraft = serde_json::from_str(
        r#"{
            "name": "Maria Souza",
            "email": null,
            "phone": "987654321",
            "notes": "prefers email"
        }"#,
    )
    .unwrap();

    assert_eq!(draft.name, "Maria Souza");
    assert_eq!(draft.email, None);
    assert_eq!(draft.phone, "987654321");
    assert_eq!(draft.notes.as_deref(), Some("prefers email"));
    assert_eq!(draft.validate(), Ok(()));
}

#[test]
fn draft_optional_fields_may_be_omitted_entirely() {
    let draft: ContactDraft =
        serde_json::from_str(r#"{"name": "Maria Souza", "phone": "987654321"}"#).unwrap();

    assert_eq!(draft.email, None);
    assert_eq!(draft.notes, None);
    assert_eq!(draft.validate(), Ok(()));
}
