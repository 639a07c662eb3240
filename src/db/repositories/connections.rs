use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::connection::{Connection, NewConnection};
use crate::db::store::{Database, StoreError};

pub struct ConnectionRepo;

impl ConnectionRepo {
    pub fn find(db: &Database, connection_id: Uuid) -> Option<Connection> {
        db.connections.get(&connection_id).cloned()
    }

    pub fn list_by_roller(db: &Database, kind: RollerKind, roller_id: Uuid) -> Vec<Connection> {
        let mut connections: Vec<Connection> = db
            .connections
            .values()
            .filter(|c| c.kind == kind && (c.source_id == roller_id || c.target_id == roller_id))
            .cloned()
            .collect();
        connections.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        connections
    }

    pub fn insert(db: &mut Database, new_connection: NewConnection) -> Result<Connection, StoreError> {
        let exists = |id: Uuid| match new_connection.kind {
            RollerKind::Issue => db.issues.contains_key(&id),
            RollerKind::Task => db.tasks.contains_key(&id),
        };
        if !exists(new_connection.source_id) {
            return Err(StoreError::ForeignKey {
                relation: "connections.source_id",
            });
        }
        if !exists(new_connection.target_id) {
            return Err(StoreError::ForeignKey {
                relation: "connections.target_id",
            });
        }
        if !db.users.contains_key(&new_connection.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "connections.user_id",
            });
        }
        let duplicate = db.connections.values().any(|c| {
            c.kind == new_connection.kind
                && c.source_id == new_connection.source_id
                && c.target_id == new_connection.target_id
        });
        if duplicate {
            return Err(StoreError::UniqueViolation {
                constraint: "connections.source_target",
            });
        }
        let connection = Connection {
            id: Uuid::new_v4(),
            kind: new_connection.kind,
            source_id: new_connection.source_id,
            target_id: new_connection.target_id,
            user_id: new_connection.user_id,
            created_at: Utc::now(),
        };
        db.connections.insert(connection.id, connection.clone());
        Ok(connection)
    }

    pub fn delete(db: &mut Database, connection_id: Uuid) -> Result<(), StoreError> {
        db.connections
            .remove(&connection_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                table: "connections",
            })
    }
}
