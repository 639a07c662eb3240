use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::EmployeeType;
use crate::db::models::user::{NewUser, UpdateUser, User, UserBasicInfo};
use crate::db::repositories::users::UserRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource, allowed};
use crate::services::context::RequestContext;
use crate::validation::user::{validate_create_user, validate_update_user};

pub struct UsersService;

impl UsersService {
    pub fn create(
        db: &mut Database,
        ctx: &RequestContext,
        name: String,
        email: String,
        employee_type: Option<EmployeeType>,
    ) -> AppResult<User> {
        policy::authorize(&ctx.actor, Action::Create, &Resource::Users)?;
        validate_create_user(&name, &email)?;
        let user = UserRepo::insert(
            db,
            NewUser {
                name,
                email,
                employee_type,
            },
        )?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Listing hides records the actor could not read individually, so a
    /// Worker sees employees plus themselves but not unemployed strangers.
    pub fn list(db: &Database, ctx: &RequestContext) -> Vec<UserBasicInfo> {
        UserRepo::list(db)
            .into_iter()
            .filter(|u| allowed(&ctx.actor, Action::Read, &Resource::UserRecord { target: u }))
            .map(UserBasicInfo::from)
            .collect()
    }

    pub fn get(db: &Database, ctx: &RequestContext, user_id: Uuid) -> AppResult<User> {
        let user = UserRepo::find(db, user_id).ok_or_else(|| AppError::not_found("user"))?;
        policy::authorize(&ctx.actor, Action::Read, &Resource::UserRecord { target: &user })?;
        Ok(user)
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        user_id: Uuid,
        changes: UpdateUser,
    ) -> AppResult<User> {
        let user = UserRepo::find(db, user_id).ok_or_else(|| AppError::not_found("user"))?;
        policy::authorize(&ctx.actor, Action::Update, &Resource::UserRecord { target: &user })?;
        validate_update_user(&changes.name, &changes.email)?;
        Ok(UserRepo::update(db, user_id, &changes)?)
    }

    /// Role assignment, admin only.
    pub fn promote(
        db: &mut Database,
        ctx: &RequestContext,
        user_id: Uuid,
        employee_type: EmployeeType,
    ) -> AppResult<User> {
        let user = UserRepo::find(db, user_id).ok_or_else(|| AppError::not_found("user"))?;
        policy::authorize(
            &ctx.actor,
            Action::Promote,
            &Resource::UserRecord { target: &user },
        )?;
        let user = UserRepo::set_employee_type(db, user_id, Some(employee_type))?;
        tracing::info!(user_id = %user.id, role = employee_type.as_str(), "role assigned");
        Ok(user)
    }

    /// Role revocation: admins may cancel anyone's role, everyone else only
    /// their own.
    pub fn cancel(db: &mut Database, ctx: &RequestContext, user_id: Uuid) -> AppResult<User> {
        let user = UserRepo::find(db, user_id).ok_or_else(|| AppError::not_found("user"))?;
        policy::authorize(
            &ctx.actor,
            Action::Cancel,
            &Resource::UserRecord { target: &user },
        )?;
        let user = UserRepo::set_employee_type(db, user_id, None)?;
        tracing::info!(user_id = %user.id, "role revoked");
        Ok(user)
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, user_id: Uuid) -> AppResult<()> {
        let user = UserRepo::find(db, user_id).ok_or_else(|| AppError::not_found("user"))?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::UserRecord { target: &user },
        )?;
        UserRepo::delete(db, user_id)?;
        tracing::info!(user_id = %user_id, "user destroyed");
        Ok(())
    }
}
