use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::notification::{NewNotification, Notification};
use crate::db::store::{Database, StoreError};

pub struct NotificationRepo;

impl NotificationRepo {
    pub fn find(db: &Database, notification_id: Uuid) -> Option<Notification> {
        db.notifications.get(&notification_id).cloned()
    }

    pub fn list_for_user(db: &Database, user_id: Uuid) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = db
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications
    }

    pub fn insert(
        db: &mut Database,
        new_notification: NewNotification,
    ) -> Result<Notification, StoreError> {
        if !db.users.contains_key(&new_notification.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "notifications.user_id",
            });
        }
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new_notification.user_id,
            kind: new_notification.kind,
            roller_id: new_notification.roller_id,
            event: new_notification.event,
            details: new_notification.details,
            comment_id: new_notification.comment_id,
            created_at: Utc::now(),
        };
        db.notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    pub fn delete(db: &mut Database, notification_id: Uuid) -> Result<(), StoreError> {
        db.notifications
            .remove(&notification_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                table: "notifications",
            })
    }

    /// Bulk clear of one user's notifications on one roller.
    pub fn delete_for_user_roller(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> usize {
        let before = db.notifications.len();
        db.notifications
            .retain(|_, n| !(n.user_id == user_id && n.kind == kind && n.roller_id == roller_id));
        before - db.notifications.len()
    }
}
