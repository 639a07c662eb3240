use crate::db::enums::RollerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed duplicate/blocked-by edge between two rollers of the same kind.
/// Creating one closes the source; destroying one reopens the source when the
/// connection is still the cause of its closed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: Uuid,
    pub kind: RollerKind,
    pub source_id: Uuid,
    pub target_id: Uuid,
    /// The connecting user.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

pub struct NewConnection {
    pub kind: RollerKind,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub user_id: Uuid,
}
