use crate::db::enums::RollerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad subscription to every issue or every task of a category.
/// Unique per (user, category, kind).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub kind: RollerKind,
    pub created_at: DateTime<Utc>,
}

/// Broad subscription to every issue or every task of a project.
/// Unique per (user, project, kind).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub kind: RollerKind,
    pub created_at: DateTime<Utc>,
}

/// Per-item subscription; the one that actually drives notification fan-out.
/// Unique per (user, kind, roller).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollerSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SubscriptionList {
    pub categories: Vec<CategorySubscription>,
    pub projects: Vec<ProjectSubscription>,
    pub rollers: Vec<RollerSubscription>,
}
