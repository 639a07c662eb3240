use crate::db::enums::{NotificationEvent, RollerKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub event: NotificationEvent,
    /// "old_status,new_status" for status events, capped at 100 chars.
    pub details: Option<String>,
    /// Back-reference to the triggering comment for comment events.
    pub comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub event: NotificationEvent,
    pub details: Option<String>,
    pub comment_id: Option<Uuid>,
}
