use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::comment::{Comment, NewComment};
use crate::db::store::{Database, StoreError};

pub struct CommentRepo;

impl CommentRepo {
    pub fn find(db: &Database, comment_id: Uuid) -> Option<Comment> {
        db.comments.get(&comment_id).cloned()
    }

    pub fn list_by_roller(db: &Database, kind: RollerKind, roller_id: Uuid) -> Vec<Comment> {
        let mut comments: Vec<Comment> = db
            .comments
            .values()
            .filter(|c| c.kind == kind && c.roller_id == roller_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments
    }

    pub fn insert(db: &mut Database, new_comment: NewComment) -> Result<Comment, StoreError> {
        let roller_exists = match new_comment.kind {
            RollerKind::Issue => db.issues.contains_key(&new_comment.roller_id),
            RollerKind::Task => db.tasks.contains_key(&new_comment.roller_id),
        };
        if !roller_exists {
            return Err(StoreError::ForeignKey {
                relation: "comments.roller_id",
            });
        }
        if !db.users.contains_key(&new_comment.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "comments.user_id",
            });
        }
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            kind: new_comment.kind,
            roller_id: new_comment.roller_id,
            user_id: new_comment.user_id,
            body: new_comment.body,
            created_at: now,
            updated_at: now,
        };
        db.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    pub fn update_body(
        db: &mut Database,
        comment_id: Uuid,
        body: String,
    ) -> Result<Comment, StoreError> {
        let comment = db
            .comments
            .get_mut(&comment_id)
            .ok_or(StoreError::NotFound { table: "comments" })?;
        comment.body = body;
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    pub fn delete(db: &mut Database, comment_id: Uuid) -> Result<(), StoreError> {
        if db.comments.remove(&comment_id).is_none() {
            return Err(StoreError::NotFound { table: "comments" });
        }
        // Notifications back-referencing the comment lose their trigger.
        db.notifications.retain(|_, n| n.comment_id != Some(comment_id));
        Ok(())
    }
}
