use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::task::{NewTask, Task, TaskAssignee, UpdateTask};
use crate::db::store::{Database, StoreError};

pub struct TaskRepo;

impl TaskRepo {
    pub fn find(db: &Database, task_id: Uuid) -> Option<Task> {
        db.tasks.get(&task_id).cloned()
    }

    pub fn list(db: &Database) -> Vec<Task> {
        let mut tasks: Vec<Task> = db.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    pub fn list_by_project(db: &Database, project_id: Uuid) -> Vec<Task> {
        let mut tasks: Vec<Task> = db
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    pub fn insert(db: &mut Database, new_task: NewTask) -> Result<Task, StoreError> {
        if !db.projects.contains_key(&new_task.project_id) {
            return Err(StoreError::ForeignKey {
                relation: "tasks.project_id",
            });
        }
        let type_ok = db
            .roller_types
            .get(&new_task.task_type_id)
            .is_some_and(|t| t.kind == RollerKind::Task);
        if !type_ok {
            return Err(StoreError::ForeignKey {
                relation: "tasks.task_type_id",
            });
        }
        if let Some(issue_id) = new_task.issue_id {
            if !db.issues.contains_key(&issue_id) {
                return Err(StoreError::ForeignKey {
                    relation: "tasks.issue_id",
                });
            }
        }
        if !db.users.contains_key(&new_task.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "tasks.user_id",
            });
        }
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id: new_task.project_id,
            task_type_id: new_task.task_type_id,
            issue_id: new_task.issue_id,
            user_id: new_task.user_id,
            summary: new_task.summary,
            description: new_task.description,
            closed: false,
            created_at: now,
            updated_at: now,
        };
        db.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    pub fn update(
        db: &mut Database,
        task_id: Uuid,
        changes: &UpdateTask,
    ) -> Result<Task, StoreError> {
        if let Some(type_id) = changes.task_type_id {
            let type_ok = db
                .roller_types
                .get(&type_id)
                .is_some_and(|t| t.kind == RollerKind::Task);
            if !type_ok {
                return Err(StoreError::ForeignKey {
                    relation: "tasks.task_type_id",
                });
            }
        }
        if let Some(Some(issue_id)) = changes.issue_id {
            if !db.issues.contains_key(&issue_id) {
                return Err(StoreError::ForeignKey {
                    relation: "tasks.issue_id",
                });
            }
        }
        let task = db
            .tasks
            .get_mut(&task_id)
            .ok_or(StoreError::NotFound { table: "tasks" })?;
        if let Some(summary) = &changes.summary {
            task.summary = summary.clone();
        }
        if let Some(description) = &changes.description {
            task.description = description.clone();
        }
        if let Some(type_id) = changes.task_type_id {
            task.task_type_id = type_id;
        }
        if let Some(issue_id) = changes.issue_id {
            task.issue_id = issue_id;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    /// Only the workflow transitions write this flag.
    pub fn set_closed(db: &mut Database, task_id: Uuid, closed: bool) -> Result<Task, StoreError> {
        let task = db
            .tasks
            .get_mut(&task_id)
            .ok_or(StoreError::NotFound { table: "tasks" })?;
        task.closed = closed;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    pub fn delete(db: &mut Database, task_id: Uuid) -> Result<(), StoreError> {
        if db.tasks.remove(&task_id).is_none() {
            return Err(StoreError::NotFound { table: "tasks" });
        }
        db.task_assignees.retain(|_, a| a.task_id != task_id);
        db.progressions.retain(|_, p| p.task_id != task_id);
        db.reviews.retain(|_, r| r.task_id != task_id);
        db.delete_roller_footprint(RollerKind::Task, task_id);
        Ok(())
    }
}

pub struct TaskAssigneeRepo;

impl TaskAssigneeRepo {
    pub fn list_by_task(db: &Database, task_id: Uuid) -> Vec<TaskAssignee> {
        let mut assignees: Vec<TaskAssignee> = db
            .task_assignees
            .values()
            .filter(|a| a.task_id == task_id)
            .cloned()
            .collect();
        assignees.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        assignees
    }

    pub fn assignee_ids(db: &Database, task_id: Uuid) -> Vec<Uuid> {
        Self::list_by_task(db, task_id)
            .into_iter()
            .map(|a| a.assignee_id)
            .collect()
    }

    pub fn is_assigned(db: &Database, task_id: Uuid, user_id: Uuid) -> bool {
        db.task_assignees
            .values()
            .any(|a| a.task_id == task_id && a.assignee_id == user_id)
    }

    pub fn insert(
        db: &mut Database,
        task_id: Uuid,
        assignee_id: Uuid,
    ) -> Result<TaskAssignee, StoreError> {
        if !db.tasks.contains_key(&task_id) {
            return Err(StoreError::ForeignKey {
                relation: "task_assignees.task_id",
            });
        }
        if !db.users.contains_key(&assignee_id) {
            return Err(StoreError::ForeignKey {
                relation: "task_assignees.assignee_id",
            });
        }
        if Self::is_assigned(db, task_id, assignee_id) {
            return Err(StoreError::UniqueViolation {
                constraint: "task_assignees.task_assignee",
            });
        }
        let assignee = TaskAssignee {
            id: Uuid::new_v4(),
            task_id,
            assignee_id,
            created_at: Utc::now(),
        };
        db.task_assignees.insert(assignee.id, assignee.clone());
        Ok(assignee)
    }

    pub fn delete(db: &mut Database, task_id: Uuid, assignee_id: Uuid) -> Result<(), StoreError> {
        let row_id = db
            .task_assignees
            .values()
            .find(|a| a.task_id == task_id && a.assignee_id == assignee_id)
            .map(|a| a.id)
            .ok_or(StoreError::NotFound {
                table: "task_assignees",
            })?;
        db.task_assignees.remove(&row_id);
        Ok(())
    }
}
