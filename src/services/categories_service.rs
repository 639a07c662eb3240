use uuid::Uuid;

use crate::db::Database;
use crate::db::models::category::{Category, NewCategory, UpdateCategory};
use crate::db::repositories::categories::CategoryRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource, category_visible};
use crate::services::context::RequestContext;
use crate::validation::category::{validate_create_category, validate_update_category};

pub struct CategoriesService;

impl CategoriesService {
    pub fn create(
        db: &mut Database,
        ctx: &RequestContext,
        new_category: NewCategory,
    ) -> AppResult<Category> {
        policy::authorize(&ctx.actor, Action::Create, &Resource::Categories)?;
        validate_create_category(&new_category.name)?;
        let category = CategoryRepo::insert(db, new_category)?;
        tracing::info!(category_id = %category.id, "category created");
        Ok(category)
    }

    pub fn list(db: &Database, ctx: &RequestContext) -> Vec<Category> {
        CategoryRepo::list(db)
            .into_iter()
            .filter(|c| category_visible(&ctx.actor, c))
            .collect()
    }

    pub fn get(db: &Database, ctx: &RequestContext, category_id: Uuid) -> AppResult<Category> {
        let category =
            CategoryRepo::find(db, category_id).ok_or_else(|| AppError::not_found("category"))?;
        policy::authorize(&ctx.actor, Action::Read, &Resource::Category(&category))?;
        Ok(category)
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        category_id: Uuid,
        changes: UpdateCategory,
    ) -> AppResult<Category> {
        let category =
            CategoryRepo::find(db, category_id).ok_or_else(|| AppError::not_found("category"))?;
        policy::authorize(&ctx.actor, Action::Update, &Resource::Category(&category))?;
        validate_update_category(&changes.name)?;
        Ok(CategoryRepo::update(db, category_id, &changes)?)
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, category_id: Uuid) -> AppResult<()> {
        let category =
            CategoryRepo::find(db, category_id).ok_or_else(|| AppError::not_found("category"))?;
        policy::authorize(&ctx.actor, Action::Destroy, &Resource::Category(&category))?;
        CategoryRepo::delete(db, category_id)?;
        tracing::info!(category_id = %category_id, "category destroyed");
        Ok(())
    }
}
