use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub visible: bool,
    pub internal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProject {
    pub category_id: Uuid,
    pub name: String,
    pub visible: bool,
    pub internal: bool,
}

#[derive(Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub internal: Option<bool>,
}
