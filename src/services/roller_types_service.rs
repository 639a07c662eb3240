use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::RollerKind;
use crate::db::models::roller_type::{NewRollerType, RollerType, UpdateRollerType};
use crate::db::repositories::roller_types::RollerTypeRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;
use crate::validation::roller_type::validate_roller_type;

// Issue/task type administration. Admin-only across the board, including
// reads.
pub struct RollerTypesService;

impl RollerTypesService {
    pub fn create(
        db: &mut Database,
        ctx: &RequestContext,
        new_type: NewRollerType,
    ) -> AppResult<RollerType> {
        policy::authorize(&ctx.actor, Action::Create, &Resource::RollerTypes)?;
        validate_roller_type(&new_type.name, &new_type.icon, &new_type.color)?;
        Ok(RollerTypeRepo::insert(db, new_type)?)
    }

    pub fn list(
        db: &Database,
        ctx: &RequestContext,
        kind: Option<RollerKind>,
    ) -> AppResult<Vec<RollerType>> {
        policy::authorize(&ctx.actor, Action::Read, &Resource::RollerTypes)?;
        Ok(RollerTypeRepo::list(db, kind))
    }

    pub fn get(db: &Database, ctx: &RequestContext, type_id: Uuid) -> AppResult<RollerType> {
        policy::authorize(&ctx.actor, Action::Read, &Resource::RollerTypes)?;
        RollerTypeRepo::find(db, type_id).ok_or_else(|| AppError::not_found("roller type"))
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        type_id: Uuid,
        changes: UpdateRollerType,
    ) -> AppResult<RollerType> {
        policy::authorize(&ctx.actor, Action::Update, &Resource::RollerTypes)?;
        let current =
            RollerTypeRepo::find(db, type_id).ok_or_else(|| AppError::not_found("roller type"))?;
        validate_roller_type(
            changes.name.as_deref().unwrap_or(&current.name),
            changes.icon.as_deref().unwrap_or(&current.icon),
            changes.color.as_deref().unwrap_or(&current.color),
        )?;
        Ok(RollerTypeRepo::update(db, type_id, &changes)?)
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, type_id: Uuid) -> AppResult<()> {
        policy::authorize(&ctx.actor, Action::Destroy, &Resource::RollerTypes)?;
        RollerTypeRepo::delete(db, type_id)?;
        Ok(())
    }
}
