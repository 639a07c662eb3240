use roller_backend::db::enums::{EmployeeType, RollerKind, TaskStatus};
use roller_backend::db::repositories::subscriptions::SubscriptionRepo;
use roller_backend::error::AppError;
use roller_backend::services::progressions_service::ProgressionsService;
use roller_backend::services::tasks_service::TasksService;

use super::fixtures::{self, ctx, world};

#[test]
fn staff_assign_anyone_workers_only_themselves() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    let other_worker = fixtures::user(&mut w.db, Some(EmployeeType::Worker));

    // Staff assigning someone else.
    assert!(TasksService::assign(&mut w.db, &ctx(&w.reviewer), task.id, w.worker.id).is_ok());

    // A worker volunteering themselves.
    let response =
        TasksService::assign(&mut w.db, &ctx(&other_worker), task.id, other_worker.id).unwrap();
    assert_eq!(response.status, TaskStatus::Assigned);

    // A worker volunteering somebody else is refused.
    let third = fixtures::user(&mut w.db, Some(EmployeeType::Worker));
    let result = TasksService::assign(&mut w.db, &ctx(&other_worker), task.id, third.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    // Reporters never assign.
    let result = TasksService::assign(&mut w.db, &ctx(&w.reporter), task.id, w.reporter.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
}

#[test]
fn assignment_subscribes_the_assignee() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    assert!(SubscriptionRepo::is_roller_subscribed(
        &w.db,
        w.worker.id,
        RollerKind::Task,
        task.id
    ));
}

#[test]
fn double_assignment_is_a_conflict() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    let result = TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id);
    assert!(matches!(result, Err(AppError::Store(_))));
}

#[test]
fn unassigning_force_finishes_only_that_users_sessions_on_that_task() {
    let mut w = world();
    let task_a = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    let task_b = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    let other_worker = fixtures::user(&mut w.db, Some(EmployeeType::Worker));

    for task_id in [task_a.id, task_b.id] {
        TasksService::assign(&mut w.db, &ctx(&w.admin), task_id, w.worker.id).unwrap();
    }
    TasksService::assign(&mut w.db, &ctx(&w.admin), task_a.id, other_worker.id).unwrap();

    let on_a = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task_a.id).unwrap();
    let on_b = ProgressionsService::create(&mut w.db, &ctx(&w.worker), task_b.id).unwrap();
    let others =
        ProgressionsService::create(&mut w.db, &ctx(&other_worker), task_a.id).unwrap();

    let response =
        TasksService::unassign(&mut w.db, &ctx(&w.admin), task_a.id, w.worker.id).unwrap();
    assert_eq!(response.assignee_ids, vec![other_worker.id]);

    assert!(w.db.progressions[&on_a.id].finished, "same task, same user");
    assert!(!w.db.progressions[&on_b.id].finished, "other task untouched");
    assert!(!w.db.progressions[&others.id].finished, "other user untouched");
}

#[test]
fn status_derives_from_closed_and_assignees() {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    assert_eq!(task.status(0), TaskStatus::Open);
    assert_eq!(task.status(2), TaskStatus::Assigned);

    let response =
        TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    assert_eq!(response.status, TaskStatus::Assigned);

    let response =
        TasksService::unassign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    assert_eq!(response.status, TaskStatus::Open);
}
