use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A worker's work session on a task. At most one unfinished row may exist
/// per (task, user); finished rows accumulate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub finished: bool,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProgression {
    pub task_id: Uuid,
    pub user_id: Uuid,
}
