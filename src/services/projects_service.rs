use uuid::Uuid;

use crate::db::Database;
use crate::db::models::project::{NewProject, Project, UpdateProject};
use crate::db::repositories::categories::CategoryRepo;
use crate::db::repositories::projects::ProjectRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource, project_visible};
use crate::services::context::RequestContext;
use crate::services::project_scope;
use crate::validation::project::{validate_create_project, validate_update_project};

pub struct ProjectsService;

impl ProjectsService {
    pub fn create(
        db: &mut Database,
        ctx: &RequestContext,
        new_project: NewProject,
    ) -> AppResult<Project> {
        policy::authorize(&ctx.actor, Action::Create, &Resource::Projects)?;
        validate_create_project(&new_project.name)?;
        let project = ProjectRepo::insert(db, new_project)?;
        tracing::info!(project_id = %project.id, "project created");
        Ok(project)
    }

    pub fn list(db: &Database, ctx: &RequestContext) -> Vec<Project> {
        ProjectRepo::list(db)
            .into_iter()
            .filter(|p| {
                CategoryRepo::find(db, p.category_id)
                    .is_some_and(|c| project_visible(&ctx.actor, p, &c))
            })
            .collect()
    }

    pub fn list_by_category(
        db: &Database,
        ctx: &RequestContext,
        category_id: Uuid,
    ) -> AppResult<Vec<Project>> {
        let category =
            CategoryRepo::find(db, category_id).ok_or_else(|| AppError::not_found("category"))?;
        policy::authorize(&ctx.actor, Action::Read, &Resource::Category(&category))?;
        Ok(ProjectRepo::list_by_category(db, category_id)
            .into_iter()
            .filter(|p| project_visible(&ctx.actor, p, &category))
            .collect())
    }

    pub fn get(db: &Database, ctx: &RequestContext, project_id: Uuid) -> AppResult<Project> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Read,
            &Resource::Project {
                project: &project,
                category: &category,
            },
        )?;
        Ok(project)
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        project_id: Uuid,
        changes: UpdateProject,
    ) -> AppResult<Project> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Update,
            &Resource::Project {
                project: &project,
                category: &category,
            },
        )?;
        validate_update_project(&changes.name)?;
        Ok(ProjectRepo::update(db, project_id, &changes)?)
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, project_id: Uuid) -> AppResult<()> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Project {
                project: &project,
                category: &category,
            },
        )?;
        ProjectRepo::delete(db, project_id)?;
        tracing::info!(project_id = %project_id, "project destroyed");
        Ok(())
    }
}
