use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::EmployeeType;
use crate::db::models::user::{NewUser, UpdateUser, User};
use crate::db::store::{Database, StoreError};

pub struct UserRepo;

impl UserRepo {
    pub fn find(db: &Database, user_id: Uuid) -> Option<User> {
        db.users.get(&user_id).cloned()
    }

    pub fn find_by_email(db: &Database, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        db.users
            .values()
            .find(|u| u.email.to_lowercase() == needle)
            .cloned()
    }

    pub fn list(db: &Database) -> Vec<User> {
        let mut users: Vec<User> = db.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        users
    }

    pub fn insert(db: &mut Database, new_user: NewUser) -> Result<User, StoreError> {
        if Self::find_by_email(db, &new_user.email).is_some() {
            return Err(StoreError::UniqueViolation {
                constraint: "users.email",
            });
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            employee_type: new_user.employee_type,
            created_at: now,
            updated_at: now,
        };
        db.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn update(
        db: &mut Database,
        user_id: Uuid,
        changes: &UpdateUser,
    ) -> Result<User, StoreError> {
        if let Some(email) = &changes.email {
            if let Some(other) = Self::find_by_email(db, email) {
                if other.id != user_id {
                    return Err(StoreError::UniqueViolation {
                        constraint: "users.email",
                    });
                }
            }
        }
        let user = db
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound { table: "users" })?;
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    /// Role assignment/revocation: the employee record is the Option field.
    pub fn set_employee_type(
        db: &mut Database,
        user_id: Uuid,
        employee_type: Option<EmployeeType>,
    ) -> Result<User, StoreError> {
        let user = db
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound { table: "users" })?;
        user.employee_type = employee_type;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    /// Destroying a user destroys its employee implicitly and clears the
    /// user's subscription/notification/assignment footprint. Authored
    /// comments, reviews and progressions stay behind as history; the
    /// workflow validity guards treat their dangling user as invalid.
    pub fn delete(db: &mut Database, user_id: Uuid) -> Result<(), StoreError> {
        if db.users.remove(&user_id).is_none() {
            return Err(StoreError::NotFound { table: "users" });
        }
        db.task_assignees.retain(|_, a| a.assignee_id != user_id);
        db.category_subscriptions.retain(|_, s| s.user_id != user_id);
        db.project_subscriptions.retain(|_, s| s.user_id != user_id);
        db.roller_subscriptions.retain(|_, s| s.user_id != user_id);
        db.notifications.retain(|_, n| n.user_id != user_id);
        Ok(())
    }
}
