use std::sync::mpsc::TryRecvError;
use taskbook_core::db::open_db_in_memory;
use taskbook_core::{SqliteTaskRepository, Task, TaskStore};

#[test]
fn subscribe_delivers_current_snapshot_immediately() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let existing = Task::new("already there", "");
    store.add_task(&existing).unwrap();

    let rx = store.subscribe().unwrap();
    let snapshot = rx.try_recv().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, existing.id);
}

#[test]
fn each_mutation_publishes_post_state_to_all_subscribers() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let first_rx = store.subscribe().unwrap();
    let second_rx = store.subscribe().unwrap();
    // Drain the initial snapshots.
    assert!(first_rx.try_recv().unwrap().is_empty());
    assert!(second_rx.try_recv().unwrap().is_empty());

    let task = Task::new("observe me", "");
    store.add_task(&task).unwrap();
    store.toggle_task(task.id).unwrap();
    store.delete_task(task.id).unwrap();

    for rx in [&first_rx, &second_rx] {
        let after_add = rx.try_recv().unwrap();
        assert_eq!(after_add.len(), 1);
        assert!(!after_add[0].completed);

        let after_toggle = rx.try_recv().unwrap();
        assert!(after_toggle[0].completed);

        let after_delete = rx.try_recv().unwrap();
        assert!(after_delete.is_empty());

        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}

#[test]
fn failed_mutation_publishes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let rx = store.subscribe().unwrap();
    assert!(rx.try_recv().unwrap().is_empty());

    let invalid = Task::new("  ", "");
    assert!(store.add_task(&invalid).is_err());

    assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
}

#[test]
fn dropped_subscribers_do_not_break_publication() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let dropped_rx = store.subscribe().unwrap();
    let kept_rx = store.subscribe().unwrap();
    assert!(kept_rx.try_recv().unwrap().is_empty());
    drop(dropped_rx);

    let task = Task::new("still flowing", "");
    store.add_task(&task).unwrap();
    store.toggle_task(task.id).unwrap();

    let after_add = kept_rx.try_recv().unwrap();
    assert_eq!(after_add.len(), 1);
    let after_toggle = kept_rx.try_recv().unwrap();
    assert!(after_toggle[0].completed);
}

#[test]
fn update_publishes_the_replaced_record() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let mut task = Task::new("before", "");
    store.add_task(&task).unwrap();

    let rx = store.subscribe().unwrap();
    let _ = rx.try_recv().unwrap();

    task.title = "after".to_string();
    store.update_task(&task).unwrap();

    let snapshot = rx.try_recv().unwrap();
    assert_eq!(snapshot[0].title, "after");
}
