//! Fan-out recipient resolution and the mail enqueue gate.

use chrono::Utc;
use uuid::Uuid;

use roller_backend::db::enums::{NotificationEvent, RollerKind};
use roller_backend::db::models::notification::{NewNotification, Notification};
use roller_backend::db::repositories::notifications::NotificationRepo;
use roller_backend::db::repositories::subscriptions::SubscriptionRepo;
use roller_backend::error::AppError;
use roller_backend::mailer::RecordingMailQueue;
use roller_backend::services::comments_service::CommentsService;
use roller_backend::services::notifications_service::NotificationsService;
use roller_backend::services::tasks_service::TasksService;

use super::fixtures::{self, ctx, world};

#[test]
fn fan_out_unions_item_project_and_category_subscribers() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);

    SubscriptionRepo::ensure_roller(&mut w.db, w.reporter.id, RollerKind::Issue, issue.id)
        .unwrap();
    SubscriptionRepo::ensure_project(&mut w.db, w.worker.id, RollerKind::Issue, w.project.id)
        .unwrap();
    SubscriptionRepo::ensure_category(&mut w.db, w.reviewer.id, RollerKind::Issue, w.category.id)
        .unwrap();
    // A task-kind category subscription never matches an issue event.
    let bystander = fixtures::user(&mut w.db, None);
    SubscriptionRepo::ensure_category(&mut w.db, bystander.id, RollerKind::Task, w.category.id)
        .unwrap();

    let delivered = NotificationsService::fan_out(
        &mut w.db,
        &mailer,
        w.admin.id,
        RollerKind::Issue,
        issue.id,
        NotificationEvent::New,
        None,
        None,
    )
    .unwrap();

    assert_eq!(delivered, 3);
    assert_eq!(mailer.jobs().len(), 3);
    let recipients: Vec<Uuid> = w.db.notifications.values().map(|n| n.user_id).collect();
    assert!(recipients.contains(&w.reporter.id));
    assert!(recipients.contains(&w.worker.id));
    assert!(recipients.contains(&w.reviewer.id));
    assert!(!recipients.contains(&bystander.id));
}

#[test]
fn the_acting_user_is_never_notified() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);
    SubscriptionRepo::ensure_roller(&mut w.db, w.worker.id, RollerKind::Issue, issue.id).unwrap();
    // Subscribed at both levels: one notification, and none as the actor.
    SubscriptionRepo::ensure_project(&mut w.db, w.worker.id, RollerKind::Issue, w.project.id)
        .unwrap();

    let delivered = NotificationsService::fan_out(
        &mut w.db,
        &mailer,
        w.worker.id,
        RollerKind::Issue,
        issue.id,
        NotificationEvent::New,
        None,
        None,
    )
    .unwrap();
    assert_eq!(delivered, 0);

    let delivered = NotificationsService::fan_out(
        &mut w.db,
        &mailer,
        w.admin.id,
        RollerKind::Issue,
        issue.id,
        NotificationEvent::New,
        None,
        None,
    )
    .unwrap();
    assert_eq!(delivered, 1, "deduplicated across subscription levels");
}

#[test]
fn task_fan_out_reaches_assignees_without_a_subscription() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    // Drop the subscription the assignment created; assignee membership
    // alone must be enough.
    SubscriptionRepo::delete_roller(&mut w.db, w.worker.id, RollerKind::Task, task.id).unwrap();

    let delivered = NotificationsService::fan_out(
        &mut w.db,
        &mailer,
        w.admin.id,
        RollerKind::Task,
        task.id,
        NotificationEvent::Status,
        Some("open,closed".to_string()),
        None,
    )
    .unwrap();
    assert_eq!(delivered, 1);
    assert_eq!(
        w.db.notifications.values().next().unwrap().user_id,
        w.worker.id
    );
}

#[test]
fn status_details_are_truncated_to_100_chars() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);
    SubscriptionRepo::ensure_roller(&mut w.db, w.worker.id, RollerKind::Issue, issue.id).unwrap();

    NotificationsService::fan_out(
        &mut w.db,
        &mailer,
        w.admin.id,
        RollerKind::Issue,
        issue.id,
        NotificationEvent::Status,
        Some("x".repeat(300)),
        None,
    )
    .unwrap();

    let stored = w.db.notifications.values().next().unwrap();
    assert_eq!(stored.details.as_ref().unwrap().chars().count(), 100);
}

#[test]
fn commenting_notifies_subscribers_with_the_comment_reference() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);
    SubscriptionRepo::ensure_roller(&mut w.db, w.reporter.id, RollerKind::Issue, issue.id)
        .unwrap();

    let comment = CommentsService::create(
        &mut w.db,
        &mailer,
        &ctx(&w.worker),
        RollerKind::Issue,
        issue.id,
        "looks related to the cache".to_string(),
    )
    .unwrap();

    let jobs = mailer.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].action, "comment");
    assert_eq!(jobs[0].mailer, "IssueMailer");
    assert_eq!(
        jobs[0].params["comment_id"],
        serde_json::json!(comment.id)
    );
}

#[test]
fn malformed_notifications_never_reach_the_mail_queue() {
    let w = world();
    let mailer = RecordingMailQueue::new();

    let notification = |event, details: Option<String>, comment_id| Notification {
        id: Uuid::new_v4(),
        user_id: w.worker.id,
        kind: RollerKind::Issue,
        roller_id: Uuid::new_v4(),
        event,
        details,
        comment_id,
        created_at: Utc::now(),
    };

    // Status without details.
    NotificationsService::send_email(
        &w.db,
        &mailer,
        &notification(NotificationEvent::Status, None, None),
    );
    // Comment whose comment row no longer exists.
    NotificationsService::send_email(
        &w.db,
        &mailer,
        &notification(NotificationEvent::Comment, None, Some(Uuid::new_v4())),
    );
    assert!(mailer.jobs().is_empty());

    // A well-formed status event does go out.
    NotificationsService::send_email(
        &w.db,
        &mailer,
        &notification(NotificationEvent::Status, Some("open,closed".to_string()), None),
    );
    assert_eq!(mailer.jobs().len(), 1);
    assert_eq!(mailer.jobs()[0].queue, "mailers");
    assert_eq!(mailer.jobs()[0].delivery, "deliver_now");
}

#[test]
fn listing_and_destroying_are_owner_scoped() {
    let mut w = world();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);
    let mine = NotificationRepo::insert(
        &mut w.db,
        NewNotification {
            user_id: w.worker.id,
            kind: RollerKind::Issue,
            roller_id: issue.id,
            event: NotificationEvent::New,
            details: None,
            comment_id: None,
        },
    )
    .unwrap();

    let listed = NotificationsService::list(&w.db, &ctx(&w.worker));
    assert_eq!(listed.len(), 1);
    assert!(NotificationsService::list(&w.db, &ctx(&w.reporter)).is_empty());

    let result = NotificationsService::destroy(&mut w.db, &ctx(&w.reporter), mine.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
    assert!(NotificationsService::destroy(&mut w.db, &ctx(&w.worker), mine.id).is_ok());
}

#[test]
fn bulk_clear_removes_only_the_actors_rows_on_that_roller() {
    let mut w = world();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);
    let other_issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.admin.id);
    let insert = |db: &mut _, user_id, roller_id| {
        NotificationRepo::insert(
            db,
            NewNotification {
                user_id,
                kind: RollerKind::Issue,
                roller_id,
                event: NotificationEvent::New,
                details: None,
                comment_id: None,
            },
        )
        .unwrap()
    };
    insert(&mut w.db, w.worker.id, issue.id);
    insert(&mut w.db, w.worker.id, issue.id);
    insert(&mut w.db, w.worker.id, other_issue.id);
    insert(&mut w.db, w.reporter.id, issue.id);

    let removed = NotificationsService::destroy_for_roller(
        &mut w.db,
        &ctx(&w.worker),
        RollerKind::Issue,
        issue.id,
    )
    .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(w.db.notifications.len(), 2);
}
