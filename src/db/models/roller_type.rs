use crate::db::enums::RollerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issue type or task type, discriminated by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollerType {
    pub id: Uuid,
    pub kind: RollerKind,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewRollerType {
    pub kind: RollerKind,
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Default)]
pub struct UpdateRollerType {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}
