use chrono::Utc;
use uuid::Uuid;

use crate::db::models::project::{NewProject, Project, UpdateProject};
use crate::db::repositories::issues::IssueRepo;
use crate::db::repositories::tasks::TaskRepo;
use crate::db::store::{Database, StoreError};

pub struct ProjectRepo;

impl ProjectRepo {
    pub fn find(db: &Database, project_id: Uuid) -> Option<Project> {
        db.projects.get(&project_id).cloned()
    }

    pub fn list(db: &Database) -> Vec<Project> {
        let mut projects: Vec<Project> = db.projects.values().cloned().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }

    pub fn list_by_category(db: &Database, category_id: Uuid) -> Vec<Project> {
        let mut projects: Vec<Project> = db
            .projects
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }

    pub fn insert(db: &mut Database, new_project: NewProject) -> Result<Project, StoreError> {
        if !db.categories.contains_key(&new_project.category_id) {
            return Err(StoreError::ForeignKey {
                relation: "projects.category_id",
            });
        }
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            category_id: new_project.category_id,
            name: new_project.name,
            visible: new_project.visible,
            internal: new_project.internal,
            created_at: now,
            updated_at: now,
        };
        db.projects.insert(project.id, project.clone());
        Ok(project)
    }

    pub fn update(
        db: &mut Database,
        project_id: Uuid,
        changes: &UpdateProject,
    ) -> Result<Project, StoreError> {
        let project = db
            .projects
            .get_mut(&project_id)
            .ok_or(StoreError::NotFound { table: "projects" })?;
        if let Some(name) = &changes.name {
            project.name = name.clone();
        }
        if let Some(visible) = changes.visible {
            project.visible = visible;
        }
        if let Some(internal) = changes.internal {
            project.internal = internal;
        }
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    /// Cascades to the project's issues and tasks.
    pub fn delete(db: &mut Database, project_id: Uuid) -> Result<(), StoreError> {
        if db.projects.remove(&project_id).is_none() {
            return Err(StoreError::NotFound { table: "projects" });
        }
        let issue_ids: Vec<Uuid> = db
            .issues
            .values()
            .filter(|i| i.project_id == project_id)
            .map(|i| i.id)
            .collect();
        for issue_id in issue_ids {
            IssueRepo::delete(db, issue_id)?;
        }
        let task_ids: Vec<Uuid> = db
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .map(|t| t.id)
            .collect();
        for task_id in task_ids {
            TaskRepo::delete(db, task_id)?;
        }
        db.project_subscriptions
            .retain(|_, s| s.project_id != project_id);
        Ok(())
    }
}
