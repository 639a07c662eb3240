//! End-to-end flows across several services, the way the API would drive
//! them.

use roller_backend::db::enums::{EmployeeType, ReviewState, RollerKind, TaskStatus};
use roller_backend::db::models::category::NewCategory;
use roller_backend::db::models::project::NewProject;
use roller_backend::db::models::roller_type::NewRollerType;
use roller_backend::error::AppError;
use roller_backend::mailer::RecordingMailQueue;
use roller_backend::services::categories_service::CategoriesService;
use roller_backend::services::issues_service::IssuesService;
use roller_backend::services::progressions_service::ProgressionsService;
use roller_backend::services::projects_service::ProjectsService;
use roller_backend::services::reviews_service::ReviewsService;
use roller_backend::services::roller_types_service::RollerTypesService;
use roller_backend::services::subscriptions_service::SubscriptionsService;
use roller_backend::services::tasks_service::{NewTaskData, TasksService};

use roller_backend::db::Database;

use super::fixtures::{self, ctx};

#[test]
fn issue_to_approved_task_leaves_the_issue_open() {
    let mut db = Database::new();
    let mailer = RecordingMailQueue::new();
    let admin = fixtures::user(&mut db, Some(EmployeeType::Admin));
    let reviewer = fixtures::user(&mut db, Some(EmployeeType::Reviewer));
    let worker = fixtures::user(&mut db, Some(EmployeeType::Worker));
    let reporter = fixtures::user(&mut db, Some(EmployeeType::Reporter));

    // Admin lays out the board.
    let ops = CategoriesService::create(
        &mut db,
        &ctx(&admin),
        NewCategory {
            name: "Ops".to_string(),
            visible: true,
            internal: false,
        },
    )
    .unwrap();
    let p1 = ProjectsService::create(
        &mut db,
        &ctx(&admin),
        NewProject {
            category_id: ops.id,
            name: "P1".to_string(),
            visible: true,
            internal: false,
        },
    )
    .unwrap();
    let bug = RollerTypesService::create(
        &mut db,
        &ctx(&admin),
        NewRollerType {
            kind: RollerKind::Issue,
            name: "Bug".to_string(),
            icon: "bug".to_string(),
            color: "#cc0000".to_string(),
        },
    )
    .unwrap();
    let chore = RollerTypesService::create(
        &mut db,
        &ctx(&admin),
        NewRollerType {
            kind: RollerKind::Task,
            name: "Chore".to_string(),
            icon: "wrench".to_string(),
            color: "#336699".to_string(),
        },
    )
    .unwrap();

    // A reporter files Bug A and is auto-subscribed.
    let issue = IssuesService::create(
        &mut db,
        &mailer,
        &ctx(&reporter),
        p1.id,
        bug.id,
        "Bug A".to_string(),
        "Crashes on save".to_string(),
    )
    .unwrap();

    // Admin plans a task out of the issue, worker takes it and works it.
    let task = TasksService::create(
        &mut db,
        &mailer,
        &ctx(&admin),
        NewTaskData {
            project_id: p1.id,
            task_type_id: chore.id,
            issue_id: Some(issue.id),
            summary: "Fix Bug A".to_string(),
            description: String::new(),
        },
    )
    .unwrap();
    TasksService::assign(&mut db, &ctx(&worker), task.id, worker.id).unwrap();
    let progression = ProgressionsService::create(&mut db, &ctx(&worker), task.id).unwrap();
    ProgressionsService::finish(&mut db, &ctx(&worker), progression.id).unwrap();

    // Worker requests review, reviewer approves; the approval closes the
    // task but the source issue stays open.
    let review = ReviewsService::create(&mut db, &ctx(&worker), task.id).unwrap();
    let resolved =
        ReviewsService::approve(&mut db, &mailer, &ctx(&reviewer), review.id).unwrap();
    assert_eq!(resolved.state, ReviewState::Approved);
    assert!(db.tasks[&task.id].closed);
    assert!(!db.issues[&issue.id].closed);

    let view = TasksService::get(&db, &ctx(&reporter), task.id).unwrap();
    assert_eq!(view.status, TaskStatus::Closed);

    // The reporter's subscription is on the issue, not the task, so the
    // task-side activity produced nothing for them.
    let reporter_rows: Vec<_> = db
        .notifications
        .values()
        .filter(|n| n.user_id == reporter.id)
        .collect();
    assert!(reporter_rows.is_empty());
}

#[test]
fn subscription_driven_notification_chain() {
    let mut w = fixtures::world();
    let mailer = RecordingMailQueue::new();

    // Reviewer watches every issue in the category.
    SubscriptionsService::subscribe_category(
        &mut w.db,
        &ctx(&w.reviewer),
        RollerKind::Issue,
        w.category.id,
    )
    .unwrap();

    let issue = IssuesService::create(
        &mut w.db,
        &mailer,
        &ctx(&w.reporter),
        w.project.id,
        w.issue_type.id,
        "Slow queries".to_string(),
        String::new(),
    )
    .unwrap();

    // Creation reached the reviewer, and then closing reaches both the
    // reviewer and the auto-subscribed reporter.
    assert_eq!(mailer.jobs().len(), 1);
    IssuesService::close(&mut w.db, &mailer, &ctx(&w.admin), issue.id).unwrap();
    assert_eq!(mailer.jobs().len(), 3);

    let reporter_status = w
        .db
        .notifications
        .values()
        .find(|n| n.user_id == w.reporter.id)
        .expect("reporter notified of close");
    assert_eq!(reporter_status.details.as_deref(), Some("open,closed"));
}

#[test]
fn reviewer_cannot_remove_an_approved_review() {
    let mut w = fixtures::world();
    let mailer = RecordingMailQueue::new();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.worker), task.id, w.worker.id).unwrap();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task.id).unwrap();
    ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();

    let result = ReviewsService::destroy(&mut w.db, &ctx(&w.reviewer), review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
    assert_eq!(w.db.reviews[&review.id].state(), ReviewState::Approved);
}
