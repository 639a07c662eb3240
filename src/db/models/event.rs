use crate::db::enums::RollerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record of an open -> closed transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Closure {
    pub id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Immutable record of a closed -> open transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reopening {
    pub id: Uuid,
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

pub struct NewClosure {
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
}

pub struct NewReopening {
    pub kind: RollerKind,
    pub roller_id: Uuid,
    pub user_id: Uuid,
}
