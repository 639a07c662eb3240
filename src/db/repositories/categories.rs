use chrono::Utc;
use uuid::Uuid;

use crate::db::models::category::{Category, NewCategory, UpdateCategory};
use crate::db::repositories::projects::ProjectRepo;
use crate::db::store::{Database, StoreError};

pub struct CategoryRepo;

impl CategoryRepo {
    pub fn find(db: &Database, category_id: Uuid) -> Option<Category> {
        db.categories.get(&category_id).cloned()
    }

    pub fn list(db: &Database) -> Vec<Category> {
        let mut categories: Vec<Category> = db.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    pub fn insert(db: &mut Database, new_category: NewCategory) -> Result<Category, StoreError> {
        if db
            .categories
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&new_category.name))
        {
            return Err(StoreError::UniqueViolation {
                constraint: "categories.name",
            });
        }
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: new_category.name,
            visible: new_category.visible,
            internal: new_category.internal,
            created_at: now,
            updated_at: now,
        };
        db.categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub fn update(
        db: &mut Database,
        category_id: Uuid,
        changes: &UpdateCategory,
    ) -> Result<Category, StoreError> {
        if let Some(name) = &changes.name {
            if db
                .categories
                .values()
                .any(|c| c.id != category_id && c.name.eq_ignore_ascii_case(name))
            {
                return Err(StoreError::UniqueViolation {
                    constraint: "categories.name",
                });
            }
        }
        let category = db
            .categories
            .get_mut(&category_id)
            .ok_or(StoreError::NotFound { table: "categories" })?;
        if let Some(name) = &changes.name {
            category.name = name.clone();
        }
        if let Some(visible) = changes.visible {
            category.visible = visible;
        }
        if let Some(internal) = changes.internal {
            category.internal = internal;
        }
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    /// Cascades to projects (and through them issues/tasks).
    pub fn delete(db: &mut Database, category_id: Uuid) -> Result<(), StoreError> {
        if db.categories.remove(&category_id).is_none() {
            return Err(StoreError::NotFound { table: "categories" });
        }
        let project_ids: Vec<Uuid> = db
            .projects
            .values()
            .filter(|p| p.category_id == category_id)
            .map(|p| p.id)
            .collect();
        for project_id in project_ids {
            ProjectRepo::delete(db, project_id)?;
        }
        db.category_subscriptions
            .retain(|_, s| s.category_id != category_id);
        Ok(())
    }
}
