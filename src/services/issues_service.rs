use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::{NotificationEvent, RollerKind};
use crate::db::models::issue::{Issue, IssueResponse, NewIssue, UpdateIssue};
use crate::db::repositories::categories::CategoryRepo;
use crate::db::repositories::issues::IssueRepo;
use crate::db::repositories::projects::ProjectRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::error::AppResult;
use crate::mailer::MailQueue;
use crate::policy::{self, Action, Resource, project_visible};
use crate::services::context::RequestContext;
use crate::services::notifications_service::NotificationsService;
use crate::services::{issue_scope, project_scope, workflow};
use crate::validation::roller::{validate_create_roller, validate_update_roller};

pub struct IssuesService;

impl IssuesService {
    /// Reporting an issue subscribes the reporter and notifies the project's
    /// and category's issue subscribers.
    pub fn create(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        project_id: Uuid,
        issue_type_id: Uuid,
        summary: String,
        description: String,
    ) -> AppResult<IssueResponse> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Create,
            &Resource::Issues {
                project: &project,
                category: &category,
            },
        )?;
        validate_create_roller(&summary, &description)?;
        let issue = IssueRepo::insert(
            db,
            NewIssue {
                project_id,
                issue_type_id,
                user_id: ctx.actor_id(),
                summary,
                description,
            },
        )?;
        SubscriptionRepo::ensure_roller(db, ctx.actor_id(), RollerKind::Issue, issue.id)?;
        NotificationsService::fan_out(
            db,
            mailer,
            ctx.actor_id(),
            RollerKind::Issue,
            issue.id,
            NotificationEvent::New,
            None,
            None,
        )?;
        tracing::info!(issue_id = %issue.id, "issue created");
        Ok(issue.into())
    }

    pub fn list(db: &Database, ctx: &RequestContext) -> Vec<IssueResponse> {
        IssueRepo::list(db)
            .into_iter()
            .filter(|issue| Self::visible(db, ctx, issue))
            .map(IssueResponse::from)
            .collect()
    }

    pub fn list_by_project(
        db: &Database,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<Vec<IssueResponse>> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Read,
            &Resource::Project {
                project: &project,
                category: &category,
            },
        )?;
        Ok(IssueRepo::list_by_project(db, project_id)
            .into_iter()
            .map(IssueResponse::from)
            .collect())
    }

    pub fn get(db: &Database, ctx: &RequestContext, issue_id: Uuid) -> AppResult<IssueResponse> {
        let (issue, project, category) = issue_scope(db, issue_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Read,
            &Resource::Issue {
                issue: &issue,
                project: &project,
                category: &category,
            },
        )?;
        Ok(issue.into())
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        issue_id: Uuid,
        changes: UpdateIssue,
    ) -> AppResult<IssueResponse> {
        let (issue, project, category) = issue_scope(db, issue_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Update,
            &Resource::Issue {
                issue: &issue,
                project: &project,
                category: &category,
            },
        )?;
        validate_update_roller(&changes.summary, &changes.description)?;
        Ok(IssueRepo::update(db, issue_id, &changes)?.into())
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, issue_id: Uuid) -> AppResult<()> {
        let (issue, project, category) = issue_scope(db, issue_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Issue {
                issue: &issue,
                project: &project,
                category: &category,
            },
        )?;
        IssueRepo::delete(db, issue_id)?;
        tracing::info!(issue_id = %issue_id, "issue destroyed");
        Ok(())
    }

    pub fn close(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        issue_id: Uuid,
    ) -> AppResult<IssueResponse> {
        let (issue, project, category) = issue_scope(db, issue_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Close,
            &Resource::Issue {
                issue: &issue,
                project: &project,
                category: &category,
            },
        )?;
        let issue: Issue = workflow::close(db, mailer, ctx.actor_id(), issue_id)?;
        Ok(issue.into())
    }

    pub fn open(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        issue_id: Uuid,
    ) -> AppResult<IssueResponse> {
        let (issue, project, category) = issue_scope(db, issue_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Open,
            &Resource::Issue {
                issue: &issue,
                project: &project,
                category: &category,
            },
        )?;
        let issue: Issue = workflow::open(db, mailer, ctx.actor_id(), issue_id)?;
        Ok(issue.into())
    }

    fn visible(db: &Database, ctx: &RequestContext, issue: &Issue) -> bool {
        ProjectRepo::find(db, issue.project_id).is_some_and(|project| {
            CategoryRepo::find(db, project.category_id)
                .is_some_and(|category| project_visible(&ctx.actor, &project, &category))
        })
    }
}
