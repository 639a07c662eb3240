use roller_backend::db::enums::EmployeeType;
use roller_backend::error::AppError;
use roller_backend::services::progressions_service::ProgressionsService;
use roller_backend::services::tasks_service::TasksService;

use super::fixtures::{self, ctx, world};

#[test]
fn only_assignees_start_sessions() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);

    let result = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    assert!(ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id).is_ok());
}

#[test]
fn one_unfinished_session_per_task_and_user() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();

    let first = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id).unwrap();
    let second = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id);
    assert!(matches!(second, Err(AppError::Store(_))));

    // Finishing frees the slot.
    ProgressionsService::finish(&mut w.db, &ctx(&w.worker), first.id).unwrap();
    assert!(ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id).is_ok());
}

#[test]
fn finish_is_owner_only_and_idempotent() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    let progression = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id).unwrap();

    // Not even staff may finish somebody else's session.
    let result = ProgressionsService::finish(&mut w.db, &ctx(&w.admin), progression.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    let finished = ProgressionsService::finish(&mut w.db, &ctx(&w.worker), progression.id).unwrap();
    let finished_at = finished.finished_at;
    assert!(finished.finished);

    let again = ProgressionsService::finish(&mut w.db, &ctx(&w.worker), progression.id).unwrap();
    assert_eq!(again.finished_at, finished_at, "timestamp unchanged");
}

#[test]
fn listing_scopes_to_own_sessions_for_workers() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    let other_worker = fixtures::user(&mut w.db, Some(EmployeeType::Worker));
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, other_worker.id).unwrap();
    ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id).unwrap();
    ProgressionsService::create(&mut w.db, &ctx(&other_worker), task.id).unwrap();

    let mine = ProgressionsService::list_by_task(&w.db, &ctx(&w.worker), task.id).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, w.worker.id);

    let all = ProgressionsService::list_by_task(&w.db, &ctx(&w.reviewer), task.id).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn destroy_is_staff_only() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    let progression = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task.id).unwrap();

    let result = ProgressionsService::destroy(&mut w.db, &ctx(&w.worker), progression.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
    assert!(ProgressionsService::destroy(&mut w.db, &ctx(&w.reviewer), progression.id).is_ok());
}
