use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Hidden from workers/reporters when false.
    pub visible: bool,
    /// Restricted to users with an employee role when true.
    pub internal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewCategory {
    pub name: String,
    pub visible: bool,
    pub internal: bool,
}

#[derive(Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub internal: Option<bool>,
}
