use crate::markdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub project_id: Uuid,
    pub issue_type_id: Uuid,
    /// The reporting user.
    pub user_id: Uuid,
    pub summary: String,
    pub description: String,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewIssue {
    pub project_id: Uuid,
    pub issue_type_id: Uuid,
    pub user_id: Uuid,
    pub summary: String,
    pub description: String,
}

#[derive(Default)]
pub struct UpdateIssue {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub issue_type_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct IssueResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub issue_type_id: Uuid,
    pub user_id: Uuid,
    pub summary: String,
    pub description: String,
    pub description_html: String,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Issue> for IssueResponse {
    fn from(issue: Issue) -> Self {
        let description_html = markdown::render(&issue.description);
        Self {
            id: issue.id,
            project_id: issue.project_id,
            issue_type_id: issue.issue_type_id,
            user_id: issue.user_id,
            summary: issue.summary,
            description: issue.description,
            description_html,
            closed: issue.closed,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}
