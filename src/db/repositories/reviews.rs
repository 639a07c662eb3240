use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::{ReviewState, RollerKind};
use crate::db::models::review::{NewReview, Review};
use crate::db::repositories::events::ReopeningRepo;
use crate::db::store::{Database, StoreError};

pub struct ReviewRepo;

impl ReviewRepo {
    pub fn find(db: &Database, review_id: Uuid) -> Option<Review> {
        db.reviews.get(&review_id).cloned()
    }

    pub fn list_by_task(db: &Database, task_id: Uuid) -> Vec<Review> {
        let mut reviews: Vec<Review> = db
            .reviews
            .values()
            .filter(|r| r.task_id == task_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        reviews
    }

    /// A review belongs to the task's current open/close cycle iff it was
    /// saved strictly after the task's most recent reopening. Reviews from
    /// prior cycles are out of date and exempt from uniqueness.
    pub fn in_current_cohort(db: &Database, review: &Review) -> bool {
        match ReopeningRepo::last_for(db, RollerKind::Task, review.task_id) {
            Some(reopening) => review.updated_at > reopening.created_at,
            None => true,
        }
    }

    pub fn current_cohort(db: &Database, task_id: Uuid) -> Vec<Review> {
        Self::list_by_task(db, task_id)
            .into_iter()
            .filter(|r| Self::in_current_cohort(db, r))
            .collect()
    }

    /// Status-scoped uniqueness within the current cohort: pending and
    /// approved exclude each other and themselves; disapproved conflicts
    /// with nothing.
    fn check_cohort_uniqueness(
        db: &Database,
        task_id: Uuid,
        state: ReviewState,
        exclude_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        if state == ReviewState::Disapproved {
            return Ok(());
        }
        let conflict = Self::current_cohort(db, task_id).into_iter().any(|r| {
            Some(r.id) != exclude_id
                && matches!(r.state(), ReviewState::Pending | ReviewState::Approved)
        });
        if conflict {
            return Err(StoreError::UniqueViolation {
                constraint: "reviews.task_status",
            });
        }
        Ok(())
    }

    pub fn insert(db: &mut Database, new_review: NewReview) -> Result<Review, StoreError> {
        if !db.tasks.contains_key(&new_review.task_id) {
            return Err(StoreError::ForeignKey {
                relation: "reviews.task_id",
            });
        }
        if !db.users.contains_key(&new_review.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "reviews.user_id",
            });
        }
        Self::check_cohort_uniqueness(db, new_review.task_id, ReviewState::Pending, None)?;
        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            task_id: new_review.task_id,
            user_id: new_review.user_id,
            approved: None,
            created_at: now,
            updated_at: now,
        };
        db.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    /// Resolution write: stamps the acting user and the new status, enforcing
    /// the cohort constraint against every row but this one.
    pub fn save_status(
        db: &mut Database,
        review_id: Uuid,
        approved: Option<bool>,
        user_id: Uuid,
    ) -> Result<Review, StoreError> {
        let task_id = db
            .reviews
            .get(&review_id)
            .map(|r| r.task_id)
            .ok_or(StoreError::NotFound { table: "reviews" })?;
        Self::check_cohort_uniqueness(
            db,
            task_id,
            ReviewState::from_approved(approved),
            Some(review_id),
        )?;
        let review = db
            .reviews
            .get_mut(&review_id)
            .ok_or(StoreError::NotFound { table: "reviews" })?;
        review.approved = approved;
        review.user_id = user_id;
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    /// Re-save without a status change: refreshes `updated_at`, which pulls
    /// a prior-cycle review back into the current cohort. Subject to the
    /// same cohort constraint, so a pending review cannot come back while
    /// another pending or approved one holds the slot.
    pub fn touch(db: &mut Database, review_id: Uuid) -> Result<Review, StoreError> {
        let (task_id, state) = db
            .reviews
            .get(&review_id)
            .map(|r| (r.task_id, r.state()))
            .ok_or(StoreError::NotFound { table: "reviews" })?;
        Self::check_cohort_uniqueness(db, task_id, state, Some(review_id))?;
        let review = db
            .reviews
            .get_mut(&review_id)
            .ok_or(StoreError::NotFound { table: "reviews" })?;
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    pub fn delete(db: &mut Database, review_id: Uuid) -> Result<(), StoreError> {
        db.reviews
            .remove(&review_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { table: "reviews" })
    }
}
