use std::sync::Once;

use dashboard_core::{merge, settle, MergeMode, Snapshot, Status};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn ready_with(items: Vec<u32>, iteration: u64) -> Snapshot<u32> {
    Snapshot {
        items,
        status: Status::Ready,
        error_message: None,
        iteration,
    }
}

#[test]
fn append_success_extends_items_and_records_iteration() {
    init_logging();
    let prev = ready_with(vec![10, 11], 1);

    let next = merge(&prev, 2, Ok(vec![12]), MergeMode::Append);

    assert_eq!(next.items, vec![10, 11, 12]);
    assert_eq!(next.iteration, 2);
    assert_eq!(next.status, Status::Ready);
    assert_eq!(next.error_message, None);
}

#[test]
fn replace_success_overwrites_items() {
    init_logging();
    let prev = ready_with(vec![1, 2, 3], 0);

    let next = merge(&prev, 0, Ok(vec![7, 8]), MergeMode::Replace);

    assert_eq!(next.items, vec![7, 8]);
    assert_eq!(next.status, Status::Ready);
}

#[test]
fn failure_keeps_items_and_sets_error() {
    init_logging();
    let prev = ready_with(vec![10, 11], 1);

    let next = merge(&prev, 2, Err("Failed to fetch metrics".into()), MergeMode::Append);

    assert_eq!(next.items, vec![10, 11]);
    assert_eq!(next.status, Status::Failed);
    assert_eq!(next.error_message.as_deref(), Some("Failed to fetch metrics"));
    // Failed iterations still advance the counter.
    assert_eq!(next.iteration, 2);
}

#[test]
fn success_after_failure_clears_error() {
    init_logging();
    let prev = Snapshot {
        items: vec![10],
        status: Status::Failed,
        error_message: Some("Failed to fetch metrics".into()),
        iteration: 1,
    };

    let next = merge(&prev, 2, Ok(vec![12]), MergeMode::Append);

    assert_eq!(next.items, vec![10, 12]);
    assert_eq!(next.status, Status::Ready);
    assert_eq!(next.error_message, None);
}

#[test]
fn stale_completion_is_dropped() {
    init_logging();
    let prev = ready_with(vec![10, 11, 12], 2);

    // Iteration 1 resolving after iteration 2 already merged.
    let next = merge(&prev, 1, Ok(vec![99]), MergeMode::Append);

    assert_eq!(next, prev);
}

#[test]
fn merge_during_initial_gate_keeps_loading() {
    init_logging();
    let prev: Snapshot<u32> = Snapshot::loading();

    let merged = merge(&prev, 0, Ok(vec![10]), MergeMode::Append);
    assert_eq!(merged.items, vec![10]);
    assert_eq!(merged.status, Status::Loading);

    let settled = settle(&merged);
    assert_eq!(settled.status, Status::Ready);
    assert_eq!(settled.items, vec![10]);
}

#[test]
fn settle_after_gated_failure_flips_to_failed() {
    init_logging();
    let prev: Snapshot<u32> = Snapshot::loading();

    let merged = merge(&prev, 0, Err("Failed to fetch metrics".into()), MergeMode::Append);
    assert_eq!(merged.status, Status::Loading);
    assert!(merged.items.is_empty());

    let settled = settle(&merged);
    assert_eq!(settled.status, Status::Failed);
    assert_eq!(settled.error_message.as_deref(), Some("Failed to fetch metrics"));
}

#[test]
fn settle_is_noop_when_not_loading() {
    init_logging();
    let ready = ready_with(vec![10], 0);
    assert_eq!(settle(&ready), ready);

    let idle: Snapshot<u32> = Snapshot::idle();
    assert_eq!(settle(&idle), idle);
}

#[test]
fn view_projects_current_snapshot() {
    init_logging();
    let loading: Snapshot<u32> = Snapshot::loading();
    let view = loading.view();
    assert!(view.is_loading);
    assert!(view.items.is_empty());
    assert_eq!(view.last_error, None);
    assert_eq!(view.iteration, 0);

    let failed = Snapshot {
        items: vec![10],
        status: Status::Failed,
        error_message: Some("Failed to fetch metrics".into()),
        iteration: 3,
    };
    let view = failed.view();
    assert!(!view.is_loading);
    assert_eq!(view.items, vec![10]);
    assert_eq!(view.last_error.as_deref(), Some("Failed to fetch metrics"));
    assert_eq!(view.iteration, 3);
}
