use crate::db::enums::TaskStatus;
use crate::markdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub task_type_id: Uuid,
    /// Source issue, if the task was planned out of one. Nullified when the
    /// issue is destroyed.
    pub issue_id: Option<Uuid>,
    /// The creating user.
    pub user_id: Uuid,
    pub summary: String,
    pub description: String,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Status is derived, never stored.
    pub fn status(&self, assignee_count: usize) -> TaskStatus {
        if self.closed {
            TaskStatus::Closed
        } else if assignee_count > 0 {
            TaskStatus::Assigned
        } else {
            TaskStatus::Open
        }
    }
}

pub struct NewTask {
    pub project_id: Uuid,
    pub task_type_id: Uuid,
    pub issue_id: Option<Uuid>,
    pub user_id: Uuid,
    pub summary: String,
    pub description: String,
}

#[derive(Default)]
pub struct UpdateTask {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub task_type_id: Option<Uuid>,
    pub issue_id: Option<Option<Uuid>>,
}

// Many-to-many task/assignee join row, unique per pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignee {
    pub id: Uuid,
    pub task_id: Uuid,
    pub assignee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub task_type_id: Uuid,
    pub issue_id: Option<Uuid>,
    pub user_id: Uuid,
    pub summary: String,
    pub description: String,
    pub description_html: String,
    pub closed: bool,
    pub status: TaskStatus,
    pub assignee_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    pub fn from_row(task: Task, assignee_ids: Vec<Uuid>) -> Self {
        let status = task.status(assignee_ids.len());
        let description_html = markdown::render(&task.description);
        Self {
            id: task.id,
            project_id: task.project_id,
            task_type_id: task.task_type_id,
            issue_id: task.issue_id,
            user_id: task.user_id,
            summary: task.summary,
            description: task.description,
            description_html,
            closed: task.closed,
            status,
            assignee_ids,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
