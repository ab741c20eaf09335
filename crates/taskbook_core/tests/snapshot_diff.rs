use taskbook_core::{diff_snapshots, Task};
use uuid::Uuid;

fn fixed_task(id: &str, title: &str) -> Task {
    Task::with_id(Uuid::parse_str(id).unwrap(), 1_700_000_000_000, title, "")
}

const ID_A: &str = "00000000-0000-4000-8000-00000000000a";
const ID_B: &str = "00000000-0000-4000-8000-00000000000b";
const ID_C: &str = "00000000-0000-4000-8000-00000000000c";

#[test]
fn classifies_added_removed_and_changed() {
    let task_a = fixed_task(ID_A, "a");
    let task_b = fixed_task(ID_B, "b");
    let task_c = fixed_task(ID_C, "c");

    let mut changed_b = task_b.clone();
    changed_b.completed = true;

    let old = vec![task_a.clone(), task_b];
    let new = vec![changed_b, task_c.clone()];

    let diff = diff_snapshots(&old, &new);
    assert_eq!(diff.added, vec![task_c.id]);
    assert_eq!(diff.removed, vec![task_a.id]);
    assert_eq!(diff.changed, vec![fixed_task(ID_B, "b").id]);
    assert!(!diff.is_empty());
}

#[test]
fn added_follows_new_order_and_removed_follows_old_order() {
    let task_a = fixed_task(ID_A, "a");
    let task_b = fixed_task(ID_B, "b");
    let task_c = fixed_task(ID_C, "c");

    let diff = diff_snapshots(
        &[task_a.clone(), task_b.clone()],
        &[task_c.clone(), task_a.clone()],
    );
    assert_eq!(diff.added, vec![task_c.id]);
    assert_eq!(diff.removed, vec![task_b.id]);
    assert!(diff.changed.is_empty());
}

#[test]
fn empty_snapshots_diff_to_empty() {
    assert!(diff_snapshots(&[], &[]).is_empty());
}

#[test]
fn everything_added_from_empty_snapshot() {
    let task_a = fixed_task(ID_A, "a");
    let task_b = fixed_task(ID_B, "b");
    let diff = diff_snapshots(&[], &[task_a.clone(), task_b.clone()]);
    assert_eq!(diff.added, vec![task_a.id, task_b.id]);
    assert!(diff.removed.is_empty());
    assert!(diff.changed.is_empty());
}

#[test]
fn title_edit_counts_as_changed() {
    let before = fixed_task(ID_A, "draft");
    let mut after = before.clone();
    after.title = "final".to_string();

    let diff = diff_snapshots(&[before.clone()], &[after]);
    assert_eq!(diff.changed, vec![before.id]);
}
