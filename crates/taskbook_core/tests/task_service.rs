use taskbook_core::db::open_db_in_memory;
use taskbook_core::{
    SqliteTaskRepository, TaskFilter, TaskService, TaskServiceError, TaskValidationError,
};
use uuid::Uuid;

#[test]
fn add_trims_title_and_description() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let task = service.add_task("  buy milk  ", "  two liters  ").unwrap();
    assert_eq!(task.title, "buy milk");
    assert_eq!(task.description, "two liters");

    let stored = service.get_task(task.id).unwrap().unwrap();
    assert_eq!(stored, task);
}

#[test]
fn add_rejects_whitespace_only_title() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let err = service.add_task("   ", "body").unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Validation(TaskValidationError::EmptyTitle)
    ));
}

#[test]
fn update_keeps_completion_and_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let created = service.add_task("draft", "v1").unwrap();
    service.toggle_task(created.id).unwrap();

    let updated = service
        .update_task(created.id, " final ", " v2 ")
        .unwrap();
    assert_eq!(updated.title, "final");
    assert_eq!(updated.description, "v2");
    assert!(updated.completed);
    assert_eq!(updated.created_at_ms, created.created_at_ms);
}

#[test]
fn missing_ids_map_to_task_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let ghost = Uuid::new_v4();
    assert!(matches!(
        service.update_task(ghost, "t", "d"),
        Err(TaskServiceError::TaskNotFound(id)) if id == ghost
    ));
    assert!(matches!(
        service.toggle_task(ghost),
        Err(TaskServiceError::TaskNotFound(id)) if id == ghost
    ));
    assert!(matches!(
        service.delete_task(ghost),
        Err(TaskServiceError::TaskNotFound(id)) if id == ghost
    ));
}

#[test]
fn list_filters_by_completion_state() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let open_task = service.add_task("open", "").unwrap();
    let done_task = service.add_task("done", "").unwrap();
    service.toggle_task(done_task.id).unwrap();

    let all = service.list_tasks(TaskFilter::All).unwrap();
    assert_eq!(all.len(), 2);

    let active = service.list_tasks(TaskFilter::Active).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, open_task.id);

    let completed = service.list_tasks(TaskFilter::Completed).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done_task.id);
}

#[test]
fn subscribe_streams_service_mutations() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let rx = service.subscribe().unwrap();
    assert!(rx.try_recv().unwrap().is_empty());

    let task = service.add_task("streamed", "").unwrap();
    let snapshot = rx.try_recv().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, task.id);

    service.delete_task(task.id).unwrap();
    assert!(rx.try_recv().unwrap().is_empty());
}
