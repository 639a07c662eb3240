use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::event::{Closure, NewClosure, NewReopening, Reopening};
use crate::db::store::{Database, StoreError};

pub struct ClosureRepo;

impl ClosureRepo {
    pub fn list_by_roller(db: &Database, kind: RollerKind, roller_id: Uuid) -> Vec<Closure> {
        let mut closures: Vec<Closure> = db
            .closures
            .values()
            .filter(|c| c.kind == kind && c.roller_id == roller_id)
            .cloned()
            .collect();
        closures.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        closures
    }

    pub fn last_for(db: &Database, kind: RollerKind, roller_id: Uuid) -> Option<Closure> {
        db.closures
            .values()
            .filter(|c| c.kind == kind && c.roller_id == roller_id)
            .max_by_key(|c| c.created_at)
            .cloned()
    }

    pub fn insert(db: &mut Database, new_closure: NewClosure) -> Result<Closure, StoreError> {
        if !db.users.contains_key(&new_closure.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "closures.user_id",
            });
        }
        let closure = Closure {
            id: Uuid::new_v4(),
            kind: new_closure.kind,
            roller_id: new_closure.roller_id,
            user_id: new_closure.user_id,
            created_at: Utc::now(),
        };
        db.closures.insert(closure.id, closure.clone());
        Ok(closure)
    }
}

pub struct ReopeningRepo;

impl ReopeningRepo {
    pub fn list_by_roller(db: &Database, kind: RollerKind, roller_id: Uuid) -> Vec<Reopening> {
        let mut reopenings: Vec<Reopening> = db
            .reopenings
            .values()
            .filter(|r| r.kind == kind && r.roller_id == roller_id)
            .cloned()
            .collect();
        reopenings.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        reopenings
    }

    /// Start of the roller's current open/close cycle; None when it has never
    /// been reopened.
    pub fn last_for(db: &Database, kind: RollerKind, roller_id: Uuid) -> Option<Reopening> {
        db.reopenings
            .values()
            .filter(|r| r.kind == kind && r.roller_id == roller_id)
            .max_by_key(|r| r.created_at)
            .cloned()
    }

    pub fn insert(db: &mut Database, new_reopening: NewReopening) -> Result<Reopening, StoreError> {
        if !db.users.contains_key(&new_reopening.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "reopenings.user_id",
            });
        }
        let reopening = Reopening {
            id: Uuid::new_v4(),
            kind: new_reopening.kind,
            roller_id: new_reopening.roller_id,
            user_id: new_reopening.user_id,
            created_at: Utc::now(),
        };
        db.reopenings.insert(reopening.id, reopening.clone());
        Ok(reopening)
    }
}

/// Timestamp of the most recent state transition of either direction, used by
/// the connection-destroy staleness guard.
pub fn last_transition_at(
    db: &Database,
    kind: RollerKind,
    roller_id: Uuid,
) -> Option<DateTime<Utc>> {
    let last_closure = ClosureRepo::last_for(db, kind, roller_id).map(|c| c.created_at);
    let last_reopening = ReopeningRepo::last_for(db, kind, roller_id).map(|r| r.created_at);
    last_closure.max(last_reopening)
}
