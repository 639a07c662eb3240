use chrono::Utc;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::roller_type::{NewRollerType, RollerType, UpdateRollerType};
use crate::db::store::{Database, StoreError};

pub struct RollerTypeRepo;

impl RollerTypeRepo {
    pub fn find(db: &Database, type_id: Uuid) -> Option<RollerType> {
        db.roller_types.get(&type_id).cloned()
    }

    pub fn list(db: &Database, kind: Option<RollerKind>) -> Vec<RollerType> {
        let mut types: Vec<RollerType> = db
            .roller_types
            .values()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .cloned()
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    pub fn insert(db: &mut Database, new_type: NewRollerType) -> Result<RollerType, StoreError> {
        if db
            .roller_types
            .values()
            .any(|t| t.kind == new_type.kind && t.name.eq_ignore_ascii_case(&new_type.name))
        {
            return Err(StoreError::UniqueViolation {
                constraint: "roller_types.kind_name",
            });
        }
        let now = Utc::now();
        let roller_type = RollerType {
            id: Uuid::new_v4(),
            kind: new_type.kind,
            name: new_type.name,
            icon: new_type.icon,
            color: new_type.color,
            created_at: now,
            updated_at: now,
        };
        db.roller_types.insert(roller_type.id, roller_type.clone());
        Ok(roller_type)
    }

    pub fn update(
        db: &mut Database,
        type_id: Uuid,
        changes: &UpdateRollerType,
    ) -> Result<RollerType, StoreError> {
        if let Some(name) = &changes.name {
            let kind = db
                .roller_types
                .get(&type_id)
                .map(|t| t.kind)
                .ok_or(StoreError::NotFound {
                    table: "roller_types",
                })?;
            if db
                .roller_types
                .values()
                .any(|t| t.id != type_id && t.kind == kind && t.name.eq_ignore_ascii_case(name))
            {
                return Err(StoreError::UniqueViolation {
                    constraint: "roller_types.kind_name",
                });
            }
        }
        let roller_type = db
            .roller_types
            .get_mut(&type_id)
            .ok_or(StoreError::NotFound {
                table: "roller_types",
            })?;
        if let Some(name) = &changes.name {
            roller_type.name = name.clone();
        }
        if let Some(icon) = &changes.icon {
            roller_type.icon = icon.clone();
        }
        if let Some(color) = &changes.color {
            roller_type.color = color.clone();
        }
        roller_type.updated_at = Utc::now();
        Ok(roller_type.clone())
    }

    pub fn delete(db: &mut Database, type_id: Uuid) -> Result<(), StoreError> {
        db.roller_types
            .remove(&type_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                table: "roller_types",
            })
    }
}
