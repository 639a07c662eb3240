//! Review lifecycle: cohort uniqueness, resolution side effects and the
//! stale/invalid guards.

use roller_backend::db::enums::ReviewState;
use roller_backend::db::repositories::users::UserRepo;
use roller_backend::error::AppError;
use roller_backend::mailer::RecordingMailQueue;
use roller_backend::services::reviews_service::ReviewsService;
use roller_backend::services::tasks_service::TasksService;

use super::fixtures::{self, ctx, tick, world};

struct ReviewSetup {
    w: fixtures::World,
    task_id: uuid::Uuid,
}

fn setup() -> ReviewSetup {
    let mut w = world();
    let task = fixtures::task(&mut w.db, w.project.id, w.task_type.id, None, w.admin.id);
    TasksService::assign(&mut w.db, &ctx(&w.admin), task.id, w.worker.id).unwrap();
    ReviewSetup { w, task_id: task.id }
}

#[test]
fn only_assignees_request_review() {
    let ReviewSetup { mut w, task_id } = setup();
    let result = ReviewsService::create(&mut w.db, &ctx(&w.reporter), task_id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();
    assert_eq!(review.state(), ReviewState::Pending);
    assert_eq!(review.user_id, w.worker.id);
}

#[test]
fn second_pending_review_in_the_same_cycle_conflicts() {
    let ReviewSetup { mut w, task_id } = setup();
    ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();
    let second = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id);
    assert!(matches!(second, Err(AppError::Store(_))));
}

#[test]
fn approving_closes_the_task_and_stamps_the_reviewer() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    let resolved =
        ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();
    assert_eq!(resolved.state, ReviewState::Approved);
    assert_eq!(resolved.user_id, w.reviewer.id);
    assert!(w.db.tasks[&task_id].closed);
    assert_eq!(w.db.closures.len(), 1);
}

#[test]
fn an_approved_review_blocks_further_requests_in_its_cycle() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();
    ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();

    let result = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id);
    assert!(matches!(result, Err(AppError::Store(_))));
}

#[test]
fn disapproval_keeps_the_task_open_and_frees_the_slot() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    let resolved =
        ReviewsService::disapprove(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();
    assert_eq!(resolved.state, ReviewState::Disapproved);
    assert!(!w.db.tasks[&task_id].closed);

    // Disapproved rows conflict with nothing, so work can be resubmitted.
    assert!(ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).is_ok());
}

#[test]
fn reopening_the_task_exempts_older_reviews_from_uniqueness() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let old_review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    tick();
    TasksService::close(&mut w.db, &mailer, &ctx(&w.admin), task_id).unwrap();
    TasksService::open(&mut w.db, &mailer, &ctx(&w.admin), task_id).unwrap();
    tick();

    // The old pending review now belongs to a prior cycle: a fresh request
    // goes through, and resolving the old one is refused.
    assert!(ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).is_ok());
    let result = ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), old_review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
}

#[test]
fn owner_refreshes_a_stale_pending_review_into_the_current_cycle() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    tick();
    TasksService::close(&mut w.db, &mailer, &ctx(&w.admin), task_id).unwrap();
    TasksService::open(&mut w.db, &mailer, &ctx(&w.admin), task_id).unwrap();
    tick();

    // Stale: not resolvable as-is.
    let result = ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    // The requester re-saves it rather than filing a new one.
    ReviewsService::update(&mut w.db, &ctx(&w.worker), review.id).unwrap();
    let resolved =
        ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();
    assert_eq!(resolved.state, ReviewState::Approved);
    assert!(w.db.tasks[&task_id].closed);
}

#[test]
fn refresh_loses_against_a_newer_pending_review() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let old_review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    tick();
    TasksService::close(&mut w.db, &mailer, &ctx(&w.admin), task_id).unwrap();
    TasksService::open(&mut w.db, &mailer, &ctx(&w.admin), task_id).unwrap();
    tick();
    ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    let result = ReviewsService::update(&mut w.db, &ctx(&w.worker), old_review.id);
    assert!(matches!(result, Err(AppError::Store(_))));
}

#[test]
fn refresh_is_owner_while_pending_or_staff() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    // Neither another non-staff user nor, post-resolution, the original
    // requester may re-save.
    let result = ReviewsService::update(&mut w.db, &ctx(&w.reporter), review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();
    let result = ReviewsService::update(&mut w.db, &ctx(&w.worker), review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));

    // Staff may.
    assert!(ReviewsService::update(&mut w.db, &ctx(&w.admin), review.id).is_ok());
}

#[test]
fn resolving_a_review_whose_requester_is_gone_is_stale() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();
    UserRepo::delete(&mut w.db, w.worker.id).unwrap();

    let result = ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id);
    assert!(matches!(result, Err(AppError::StaleState { .. })));
    assert!(!w.db.tasks[&task_id].closed, "task untouched");
    assert!(w.db.reviews[&review.id].approved.is_none(), "row untouched");
}

#[test]
fn withdrawal_is_owner_only_while_pending_and_open() {
    let ReviewSetup { mut w, task_id } = setup();
    let mailer = RecordingMailQueue::new();
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();

    let result = ReviewsService::destroy(&mut w.db, &ctx(&w.reviewer), review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
    assert!(ReviewsService::destroy(&mut w.db, &ctx(&w.worker), review.id).is_ok());

    // Once resolved, not even the stamped owner may remove it.
    let review = ReviewsService::create(&mut w.db, &ctx(&w.worker), task_id).unwrap();
    ReviewsService::approve(&mut w.db, &mailer, &ctx(&w.reviewer), review.id).unwrap();
    let result = ReviewsService::destroy(&mut w.db, &ctx(&w.reviewer), review.id);
    assert!(matches!(result, Err(AppError::Forbidden { .. })));
}
