//! Close/open transitions: records, subscriptions, idempotence and the
//! status notifications they fan out.

use roller_backend::db::enums::{NotificationEvent, RollerKind};
use roller_backend::db::models::issue::Issue;
use roller_backend::db::models::task::Task;
use roller_backend::db::repositories::subscriptions::SubscriptionRepo;
use roller_backend::db::repositories::users::UserRepo;
use roller_backend::error::AppError;
use roller_backend::mailer::RecordingMailQueue;
use roller_backend::services::workflow;

use super::fixtures::{self, world};

#[test]
fn closing_an_issue_records_a_closure_and_flips_the_flag() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);

    let closed: Issue = workflow::close(&mut w.db, &mailer, w.reviewer.id, issue.id).unwrap();
    assert!(closed.closed);
    assert_eq!(w.db.closures.len(), 1);
    assert!(w.db.reopenings.is_empty());

    // The acting user ends up subscribed to the item.
    assert!(SubscriptionRepo::is_roller_subscribed(
        &w.db,
        w.reviewer.id,
        RollerKind::Issue,
        issue.id
    ));
}

#[test]
fn closing_twice_is_a_no_op() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);

    let _: Issue = workflow::close(&mut w.db, &mailer, w.reviewer.id, issue.id).unwrap();
    let again: Issue = workflow::close(&mut w.db, &mailer, w.reviewer.id, issue.id).unwrap();
    assert!(again.closed);
    assert_eq!(w.db.closures.len(), 1, "no second closure record");
}

#[test]
fn reopening_records_the_transition_and_notifies_with_old_and_new_status() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);

    let _: Issue = workflow::close(&mut w.db, &mailer, w.reviewer.id, issue.id).unwrap();
    let reopened: Issue = workflow::open(&mut w.db, &mailer, w.admin.id, issue.id).unwrap();
    assert!(!reopened.closed);
    assert_eq!(w.db.reopenings.len(), 1);

    // The close subscribed the reviewer, so the reopen (driven by the
    // admin) notifies them with old and new status.
    let status_notifications: Vec<_> = w
        .db
        .notifications
        .values()
        .filter(|n| n.event == NotificationEvent::Status && n.user_id == w.reviewer.id)
        .collect();
    assert_eq!(status_notifications.len(), 1);
    assert_eq!(
        status_notifications[0].details.as_deref(),
        Some("closed,open")
    );
}

#[test]
fn task_status_labels_account_for_assignees() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    SubscriptionRepo::ensure_roller(&mut w.db, w.worker.id, RollerKind::Task, task.id).unwrap();

    let _: Task = workflow::close(&mut w.db, &mailer, w.admin.id, task.id).unwrap();
    let notification = w
        .db
        .notifications
        .values()
        .find(|n| n.user_id == w.worker.id && n.event == NotificationEvent::Status)
        .expect("subscriber notified");
    assert_eq!(notification.details.as_deref(), Some("open,closed"));
}

#[test]
fn transition_refused_when_the_owner_is_gone() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let owner = fixtures::user(&mut w.db, None);
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, owner.id);
    UserRepo::delete(&mut w.db, owner.id).unwrap();

    let result: Result<Issue, _> = workflow::close(&mut w.db, &mailer, w.admin.id, issue.id);
    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert!(!w.db.issues[&issue.id].closed);
    assert!(w.db.closures.is_empty());
}

#[test]
fn unknown_roller_is_not_found() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let result: Result<Task, _> =
        workflow::close(&mut w.db, &mailer, w.admin.id, uuid::Uuid::new_v4());
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}
