use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::subscription::{
    CategorySubscription, ProjectSubscription, RollerSubscription,
};
use crate::db::store::{Database, StoreError};

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Idempotent item-level subscribe. Returns true when a row was created.
    pub fn ensure_roller(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> Result<bool, StoreError> {
        if !db.users.contains_key(&user_id) {
            return Err(StoreError::ForeignKey {
                relation: "roller_subscriptions.user_id",
            });
        }
        let exists = db
            .roller_subscriptions
            .values()
            .any(|s| s.user_id == user_id && s.kind == kind && s.roller_id == roller_id);
        if exists {
            return Ok(false);
        }
        let subscription = RollerSubscription {
            id: Uuid::new_v4(),
            user_id,
            kind,
            roller_id,
            created_at: Utc::now(),
        };
        db.roller_subscriptions
            .insert(subscription.id, subscription);
        Ok(true)
    }

    pub fn ensure_category(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        category_id: Uuid,
    ) -> Result<bool, StoreError> {
        if !db.categories.contains_key(&category_id) {
            return Err(StoreError::ForeignKey {
                relation: "category_subscriptions.category_id",
            });
        }
        let exists = db
            .category_subscriptions
            .values()
            .any(|s| s.user_id == user_id && s.kind == kind && s.category_id == category_id);
        if exists {
            return Ok(false);
        }
        let subscription = CategorySubscription {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            kind,
            created_at: Utc::now(),
        };
        db.category_subscriptions
            .insert(subscription.id, subscription);
        Ok(true)
    }

    pub fn ensure_project(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        project_id: Uuid,
    ) -> Result<bool, StoreError> {
        if !db.projects.contains_key(&project_id) {
            return Err(StoreError::ForeignKey {
                relation: "project_subscriptions.project_id",
            });
        }
        let exists = db
            .project_subscriptions
            .values()
            .any(|s| s.user_id == user_id && s.kind == kind && s.project_id == project_id);
        if exists {
            return Ok(false);
        }
        let subscription = ProjectSubscription {
            id: Uuid::new_v4(),
            user_id,
            project_id,
            kind,
            created_at: Utc::now(),
        };
        db.project_subscriptions
            .insert(subscription.id, subscription);
        Ok(true)
    }

    pub fn delete_roller(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> Result<(), StoreError> {
        let row_id = db
            .roller_subscriptions
            .values()
            .find(|s| s.user_id == user_id && s.kind == kind && s.roller_id == roller_id)
            .map(|s| s.id)
            .ok_or(StoreError::NotFound {
                table: "roller_subscriptions",
            })?;
        db.roller_subscriptions.remove(&row_id);
        Ok(())
    }

    pub fn delete_category(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        category_id: Uuid,
    ) -> Result<(), StoreError> {
        let row_id = db
            .category_subscriptions
            .values()
            .find(|s| s.user_id == user_id && s.kind == kind && s.category_id == category_id)
            .map(|s| s.id)
            .ok_or(StoreError::NotFound {
                table: "category_subscriptions",
            })?;
        db.category_subscriptions.remove(&row_id);
        Ok(())
    }

    pub fn delete_project(
        db: &mut Database,
        user_id: Uuid,
        kind: RollerKind,
        project_id: Uuid,
    ) -> Result<(), StoreError> {
        let row_id = db
            .project_subscriptions
            .values()
            .find(|s| s.user_id == user_id && s.kind == kind && s.project_id == project_id)
            .map(|s| s.id)
            .ok_or(StoreError::NotFound {
                table: "project_subscriptions",
            })?;
        db.project_subscriptions.remove(&row_id);
        Ok(())
    }

    pub fn roller_subscribers(db: &Database, kind: RollerKind, roller_id: Uuid) -> Vec<Uuid> {
        db.roller_subscriptions
            .values()
            .filter(|s| s.kind == kind && s.roller_id == roller_id)
            .map(|s| s.user_id)
            .collect()
    }

    pub fn category_subscribers(db: &Database, kind: RollerKind, category_id: Uuid) -> Vec<Uuid> {
        db.category_subscriptions
            .values()
            .filter(|s| s.kind == kind && s.category_id == category_id)
            .map(|s| s.user_id)
            .collect()
    }

    pub fn project_subscribers(db: &Database, kind: RollerKind, project_id: Uuid) -> Vec<Uuid> {
        db.project_subscriptions
            .values()
            .filter(|s| s.kind == kind && s.project_id == project_id)
            .map(|s| s.user_id)
            .collect()
    }

    pub fn is_roller_subscribed(
        db: &Database,
        user_id: Uuid,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> bool {
        db.roller_subscriptions
            .values()
            .any(|s| s.user_id == user_id && s.kind == kind && s.roller_id == roller_id)
    }

    pub fn list_for_user(
        db: &Database,
        user_id: Uuid,
    ) -> (
        Vec<CategorySubscription>,
        Vec<ProjectSubscription>,
        Vec<RollerSubscription>,
    ) {
        let mut categories: Vec<CategorySubscription> = db
            .category_subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut projects: Vec<ProjectSubscription> = db
            .project_subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut rollers: Vec<RollerSubscription> = db
            .roller_subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        rollers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        (categories, projects, rollers)
    }
}
