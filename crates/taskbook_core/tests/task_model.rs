use taskbook_core::{Task, TaskValidationError, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
use uuid::Uuid;

#[test]
fn serialized_field_names_are_the_stored_schema() {
    let task = Task::with_id(
        Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap(),
        1_700_000_000_000,
        "title",
        "description",
    );

    let value = serde_json::to_value(&task).unwrap();
    let object = value.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["completed", "created_at_ms", "description", "id", "title"]
    );
    assert_eq!(object["completed"], serde_json::json!(false));
}

#[test]
fn deserializes_stored_json_shape() {
    let raw = r#"{
        "id": "00000000-0000-4000-8000-000000000002",
        "title": "from disk",
        "description": "",
        "completed": true,
        "created_at_ms": 42
    }"#;

    let task: Task = serde_json::from_str(raw).unwrap();
    assert_eq!(task.title, "from disk");
    assert!(task.completed);
    assert_eq!(task.created_at_ms, 42);
}

#[test]
fn roundtrip_preserves_every_field() {
    let mut task = Task::new("roundtrip", "body");
    task.toggle_completed();

    let encoded = serde_json::to_string(&task).unwrap();
    let decoded: Task = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn validation_boundaries() {
    assert!(Task::new("x", "").is_valid());
    assert!(Task::new("x".repeat(TITLE_MAX_CHARS), "y".repeat(DESCRIPTION_MAX_CHARS)).is_valid());
    assert_eq!(
        Task::new("", "").validate(),
        Err(TaskValidationError::EmptyTitle)
    );
    assert!(matches!(
        Task::new("x", "y".repeat(DESCRIPTION_MAX_CHARS + 1)).validate(),
        Err(TaskValidationError::DescriptionTooLong { .. })
    ));
}

#[test]
fn validation_errors_render_readable_messages() {
    let message = Task::new("x".repeat(TITLE_MAX_CHARS + 5), "")
        .validate()
        .unwrap_err()
        .to_string();
    assert!(message.contains("105"));
    assert!(message.contains("100"));
}
