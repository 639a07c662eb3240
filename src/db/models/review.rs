use crate::db::enums::ReviewState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reviewer judgment on a task. `approved` is None while pending; approving
/// or disapproving stamps the acting reviewer onto `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub approved: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn state(&self) -> ReviewState {
        ReviewState::from_approved(self.approved)
    }

    pub fn pending(&self) -> bool {
        self.approved.is_none()
    }
}

pub struct NewReview {
    pub task_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub approved: Option<bool>,
    pub state: ReviewState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        let state = review.state();
        Self {
            id: review.id,
            task_id: review.task_id,
            user_id: review.user_id,
            approved: review.approved,
            state,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}
