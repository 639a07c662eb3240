use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::issue::{Issue, NewIssue, UpdateIssue};
use crate::db::store::{Database, StoreError};

pub struct IssueRepo;

impl IssueRepo {
    pub fn find(db: &Database, issue_id: Uuid) -> Option<Issue> {
        db.issues.get(&issue_id).cloned()
    }

    pub fn list(db: &Database) -> Vec<Issue> {
        let mut issues: Vec<Issue> = db.issues.values().cloned().collect();
        issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        issues
    }

    pub fn list_by_project(db: &Database, project_id: Uuid) -> Vec<Issue> {
        let mut issues: Vec<Issue> = db
            .issues
            .values()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect();
        issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        issues
    }

    pub fn insert(db: &mut Database, new_issue: NewIssue) -> Result<Issue, StoreError> {
        if !db.projects.contains_key(&new_issue.project_id) {
            return Err(StoreError::ForeignKey {
                relation: "issues.project_id",
            });
        }
        let type_ok = db
            .roller_types
            .get(&new_issue.issue_type_id)
            .is_some_and(|t| t.kind == RollerKind::Issue);
        if !type_ok {
            return Err(StoreError::ForeignKey {
                relation: "issues.issue_type_id",
            });
        }
        if !db.users.contains_key(&new_issue.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "issues.user_id",
            });
        }
        let now = Utc::now();
        let issue = Issue {
            id: Uuid::new_v4(),
            project_id: new_issue.project_id,
            issue_type_id: new_issue.issue_type_id,
            user_id: new_issue.user_id,
            summary: new_issue.summary,
            description: new_issue.description,
            closed: false,
            created_at: now,
            updated_at: now,
        };
        db.issues.insert(issue.id, issue.clone());
        Ok(issue)
    }

    pub fn update(
        db: &mut Database,
        issue_id: Uuid,
        changes: &UpdateIssue,
    ) -> Result<Issue, StoreError> {
        if let Some(type_id) = changes.issue_type_id {
            let type_ok = db
                .roller_types
                .get(&type_id)
                .is_some_and(|t| t.kind == RollerKind::Issue);
            if !type_ok {
                return Err(StoreError::ForeignKey {
                    relation: "issues.issue_type_id",
                });
            }
        }
        let issue = db
            .issues
            .get_mut(&issue_id)
            .ok_or(StoreError::NotFound { table: "issues" })?;
        if let Some(summary) = &changes.summary {
            issue.summary = summary.clone();
        }
        if let Some(description) = &changes.description {
            issue.description = description.clone();
        }
        if let Some(type_id) = changes.issue_type_id {
            issue.issue_type_id = type_id;
        }
        issue.updated_at = Utc::now();
        Ok(issue.clone())
    }

    /// Only the workflow transitions write this flag.
    pub fn set_closed(db: &mut Database, issue_id: Uuid, closed: bool) -> Result<Issue, StoreError> {
        let issue = db
            .issues
            .get_mut(&issue_id)
            .ok_or(StoreError::NotFound { table: "issues" })?;
        issue.closed = closed;
        issue.updated_at = Utc::now();
        Ok(issue.clone())
    }

    /// Tasks survive issue destruction but lose the link.
    pub fn delete(db: &mut Database, issue_id: Uuid) -> Result<(), StoreError> {
        if db.issues.remove(&issue_id).is_none() {
            return Err(StoreError::NotFound { table: "issues" });
        }
        for task in db.tasks.values_mut() {
            if task.issue_id == Some(issue_id) {
                task.issue_id = None;
            }
        }
        db.delete_roller_footprint(RollerKind::Issue, issue_id);
        Ok(())
    }
}
