use roller_backend::db::enums::RollerKind;
use roller_backend::db::models::task::NewTask;
use roller_backend::db::repositories::issues::IssueRepo;
use roller_backend::db::repositories::tasks::TaskRepo;
use roller_backend::mailer::RecordingMailQueue;
use roller_backend::services::search_service::{RollerFilters, SearchService};
use roller_backend::services::tasks_service::TasksService;
use roller_backend::services::workflow;

use super::fixtures::{self, ctx, world};

#[test]
fn search_spans_both_kinds_newest_first() {
    let mut w = world();
    let issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);
    fixtures::tick();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);

    let rows = SearchService::search(&w.db, &ctx(&w.worker), &RollerFilters::default());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, task.id, "newest first");
    assert_eq!(rows[1].id, issue.id);
    assert_eq!(rows[0].project_name, w.project.name);
}

#[test]
fn kind_and_closed_filters_apply() {
    let mut w = world();
    let mailer = RecordingMailQueue::new();
    fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);
    let closed_issue = fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);
    let _: roller_backend::db::models::issue::Issue =
        workflow::close(&mut w.db, &mailer, w.admin.id, closed_issue.id).unwrap();
    fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);

    let issues_only = SearchService::search(
        &w.db,
        &ctx(&w.admin),
        &RollerFilters {
            kind: Some(RollerKind::Issue),
            ..Default::default()
        },
    );
    assert_eq!(issues_only.len(), 2);
    assert!(issues_only.iter().all(|r| r.kind == RollerKind::Issue));

    let closed_only = SearchService::search(
        &w.db,
        &ctx(&w.admin),
        &RollerFilters {
            closed: Some(true),
            ..Default::default()
        },
    );
    assert_eq!(closed_only.len(), 1);
    assert_eq!(closed_only[0].id, closed_issue.id);
    assert_eq!(closed_only[0].status, "closed");
}

#[test]
fn query_matches_summaries_case_insensitively() {
    let mut w = world();
    let issue = IssueRepo::insert(
        &mut w.db,
        roller_backend::db::models::issue::NewIssue {
            project_id: w.project.id,
            issue_type_id: w.issue_type.id,
            user_id: w.reporter.id,
            summary: "Login TIMEOUT after upgrade".to_string(),
            description: String::new(),
        },
    )
    .unwrap();
    fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);

    let rows = SearchService::search(
        &w.db,
        &ctx(&w.admin),
        &RollerFilters {
            query: Some("timeout".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, issue.id);
}

#[test]
fn invisible_projects_never_leak_into_results() {
    let mut w = world();
    let hidden_project = fixtures::project(&mut w.db, w.category.id, false, false);
    fixtures::issue(&mut w.db, hidden_project.id, w.issue_type.id, w.reporter.id);
    fixtures::issue(&mut w.db, w.project.id, w.issue_type.id, w.reporter.id);

    let seen_by_worker = SearchService::search(&w.db, &ctx(&w.worker), &RollerFilters::default());
    assert_eq!(seen_by_worker.len(), 1);

    let seen_by_staff = SearchService::search(&w.db, &ctx(&w.reviewer), &RollerFilters::default());
    assert_eq!(seen_by_staff.len(), 2);
}

#[test]
fn task_rows_carry_the_derived_status() {
    let mut w = world();
    let task = TaskRepo::insert(
        &mut w.db,
        NewTask {
            project_id: w.project.id,
            task_type_id: w.task_type.id,
            issue_id: None,
            user_id: w.admin.id,
            summary: "Ship it".to_string(),
            description: String::new(),
        },
    )
    .unwrap();
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();

    let rows = SearchService::search(
        &w.db,
        &ctx(&w.admin),
        &RollerFilters {
            kind: Some(RollerKind::Task),
            ..Default::default()
        },
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "assigned");
}
