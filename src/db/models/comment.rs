use crate::db::enums::RollerKind;
use crate::markdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewComment {
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub body_html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        let body_html = markdown::render(&comment.body);
        Self {
            id: comment.id,
            kind: comment.kind,
            roller_id: comment.roller_id,
            user_id: comment.user_id,
            body: comment.body,
            body_html,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
