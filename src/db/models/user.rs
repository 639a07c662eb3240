use crate::db::enums::EmployeeType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// None means unemployed (no role).
    pub employee_type: Option<EmployeeType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.employee_type == Some(EmployeeType::Admin)
    }

    /// Admin or Reviewer: the roles that see everything and manage state.
    pub fn is_staff(&self) -> bool {
        matches!(
            self.employee_type,
            Some(EmployeeType::Admin) | Some(EmployeeType::Reviewer)
        )
    }

    pub fn is_employee(&self) -> bool {
        self.employee_type.is_some()
    }
}

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub employee_type: Option<EmployeeType>,
}

#[derive(Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct UserBasicInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub employee_type: Option<EmployeeType>,
}

impl From<User> for UserBasicInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            employee_type: user.employee_type,
        }
    }
}
