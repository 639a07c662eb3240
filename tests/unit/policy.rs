//! Permission matrix across the four roles plus users without a role,
//! exercised through the real services so the visibility scoping is
//! included, not just the pure rules.

use roller_backend::db::enums::EmployeeType;
use roller_backend::db::models::category::NewCategory;
use roller_backend::db::models::issue::UpdateIssue;
use roller_backend::error::AppError;
use roller_backend::mailer::RecordingMailQueue;
use roller_backend::policy::{Action, Resource, allowed};
use roller_backend::services::categories_service::CategoriesService;
use roller_backend::services::issues_service::IssuesService;
use roller_backend::services::projects_service::ProjectsService;
use roller_backend::services::tasks_service::{NewTaskData, TasksService};

use super::fixtures::{self, ctx, world};

fn is_forbidden<T>(result: Result<T, AppError>) -> bool {
    matches!(result, Err(AppError::Forbidden { .. }))
}

#[test]
fn only_admin_creates_categories() {
    let mut w = world();
    for actor in [&w.reviewer, &w.worker, &w.reporter] {
        let result = CategoriesService::create(
            &mut w.db,
            &ctx(actor),
            NewCategory {
                name: "Ops".to_string(),
                visible: true,
                internal: false,
            },
        );
        assert!(is_forbidden(result));
    }
    let created = CategoriesService::create(
        &mut w.db,
        &ctx(&w.admin),
        NewCategory {
            name: "Ops".to_string(),
            visible: true,
            internal: false,
        },
    );
    assert!(created.is_ok());
}

#[test]
fn hidden_projects_are_invisible_to_non_staff() {
    let mut w = world();
    let hidden = fixtures::project(&mut w.db, w.category.id, false, false);

    assert!(ProjectsService::get(&w.db, &ctx(&w.reviewer), hidden.id).is_ok());
    assert!(is_forbidden(ProjectsService::get(
        &w.db,
        &ctx(&w.worker),
        hidden.id
    )));
    assert!(is_forbidden(ProjectsService::get(
        &w.db,
        &ctx(&w.reporter),
        hidden.id
    )));
}

#[test]
fn internal_scopes_require_an_employee_role() {
    let mut w = world();
    let internal_category = fixtures::category(&mut w.db, true, true);
    let internal_project = fixtures::project(&mut w.db, internal_category.id, true, true);
    let outsider = fixtures::user(&mut w.db, None);

    assert!(ProjectsService::get(&w.db, &ctx(&w.worker), internal_project.id).is_ok());
    assert!(is_forbidden(ProjectsService::get(
        &w.db,
        &ctx(&outsider),
        internal_project.id
    )));
}

#[test]
fn anyone_who_sees_the_project_may_report_an_issue() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let outsider = fixtures::user(&mut w.db, None);

    for actor in [&w.reporter, &w.worker, &outsider] {
        let result = IssuesService::create(
            &mut w.db,
            &mailer,
            &ctx(actor),
            w.project.id,
            w.issue_type.id,
            "Broken page".to_string(),
            "It 500s".to_string(),
        );
        assert!(result.is_ok());
    }
}

#[test]
fn issue_update_is_staff_or_reporter_of_record() {
    let mut w = world();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);
    let other_reporter = fixtures::user(&mut w.db, Some(EmployeeType::Reporter));

    let change = |summary: &str| UpdateIssue {
        summary: Some(summary.to_string()),
        ..Default::default()
    };

    assert!(IssuesService::update(&mut w.db, &ctx(&w.reporter), issue.id, change("mine")).is_ok());
    assert!(IssuesService::update(&mut w.db, &ctx(&w.reviewer), issue.id, change("staff")).is_ok());
    assert!(is_forbidden(IssuesService::update(
        &mut w.db,
        &ctx(&other_reporter),
        issue.id,
        change("not mine"),
    )));
}

#[test]
fn issue_destroy_and_close_split_between_admin_and_staff() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);

    assert!(is_forbidden(IssuesService::close(
        &mut w.db,
        &mailer,
        &ctx(&w.worker),
        issue.id
    )));
    assert!(IssuesService::close(&mut w.db, &mailer, &ctx(&w.reviewer), issue.id).is_ok());

    assert!(is_forbidden(IssuesService::destroy(
        &mut w.db,
        &ctx(&w.reviewer),
        issue.id
    )));
    assert!(IssuesService::destroy(&mut w.db, &ctx(&w.admin), issue.id).is_ok());
}

#[test]
fn direct_task_creation_is_admin_only() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();

    let project_id = w.project.id;
    let task_type_id = w.task_type.id;
    let payload = |summary: &str| NewTaskData {
        project_id,
        task_type_id,
        issue_id: None,
        summary: summary.to_string(),
        description: "notes".to_string(),
    };

    assert!(is_forbidden(TasksService::create(
        &mut w.db,
        &mailer,
        &ctx(&w.reviewer),
        payload("no"),
    )));
    assert!(TasksService::create(&mut w.db, &mailer, &ctx(&w.admin), payload("yes")).is_ok());
}

#[test]
fn task_transitions_are_admin_only() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);

    assert!(is_forbidden(TasksService::close(
        &mut w.db,
        &mailer,
        &ctx(&w.reviewer),
        task.id
    )));
    assert!(TasksService::close(&mut w.db, &mailer, &ctx(&w.admin), task.id).is_ok());
}

#[test]
fn review_resolution_is_reserved_to_staff() {
    let w = world();
    let resource = Resource::Review {
        owner_id: w.worker.id,
        pending: true,
        active_pending: true,
        task_open: true,
    };
    assert!(allowed(&w.admin, Action::Approve, &resource));
    assert!(allowed(&w.reviewer, Action::Disapprove, &resource));
    assert!(!allowed(&w.worker, Action::Approve, &resource));
    assert!(!allowed(&w.reporter, Action::Disapprove, &resource));
}

#[test]
fn stale_reviews_cannot_be_resolved_even_by_staff() {
    let w = world();
    let resource = Resource::Review {
        owner_id: w.worker.id,
        pending: true,
        active_pending: false,
        task_open: false,
    };
    assert!(!allowed(&w.admin, Action::Approve, &resource));
    assert!(!allowed(&w.reviewer, Action::Disapprove, &resource));
}

#[test]
fn comments_are_editable_by_staff_or_author() {
    let w = world();
    let resource = Resource::Comment {
        owner_id: w.reporter.id,
    };
    assert!(allowed(&w.reporter, Action::Update, &resource));
    assert!(allowed(&w.reviewer, Action::Destroy, &resource));
    assert!(!allowed(&w.worker, Action::Update, &resource));
    assert!(allowed(&w.worker, Action::Read, &resource));
}
