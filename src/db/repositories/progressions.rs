use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::models::progression::{NewProgression, Progression};
use crate::db::store::{Database, StoreError};

pub struct ProgressionRepo;

impl ProgressionRepo {
    pub fn find(db: &Database, progression_id: Uuid) -> Option<Progression> {
        db.progressions.get(&progression_id).cloned()
    }

    pub fn list_by_task(db: &Database, task_id: Uuid) -> Vec<Progression> {
        let mut progressions: Vec<Progression> = db
            .progressions
            .values()
            .filter(|p| p.task_id == task_id)
            .cloned()
            .collect();
        progressions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        progressions
    }

    pub fn find_unfinished(db: &Database, task_id: Uuid, user_id: Uuid) -> Option<Progression> {
        db.progressions
            .values()
            .find(|p| p.task_id == task_id && p.user_id == user_id && !p.finished)
            .cloned()
    }

    /// Uniqueness is scoped to (task, user, finished = false): many finished
    /// rows per pair, never two unfinished.
    pub fn insert(
        db: &mut Database,
        new_progression: NewProgression,
    ) -> Result<Progression, StoreError> {
        if !db.tasks.contains_key(&new_progression.task_id) {
            return Err(StoreError::ForeignKey {
                relation: "progressions.task_id",
            });
        }
        if !db.users.contains_key(&new_progression.user_id) {
            return Err(StoreError::ForeignKey {
                relation: "progressions.user_id",
            });
        }
        if Self::find_unfinished(db, new_progression.task_id, new_progression.user_id).is_some() {
            return Err(StoreError::UniqueViolation {
                constraint: "progressions.task_user_unfinished",
            });
        }
        let now = Utc::now();
        let progression = Progression {
            id: Uuid::new_v4(),
            task_id: new_progression.task_id,
            user_id: new_progression.user_id,
            finished: false,
            finished_at: None,
            created_at: now,
            updated_at: now,
        };
        db.progressions.insert(progression.id, progression.clone());
        Ok(progression)
    }

    pub fn finish(
        db: &mut Database,
        progression_id: Uuid,
        finished_at: DateTime<Utc>,
    ) -> Result<Progression, StoreError> {
        let progression = db
            .progressions
            .get_mut(&progression_id)
            .ok_or(StoreError::NotFound {
                table: "progressions",
            })?;
        progression.finished = true;
        progression.finished_at = Some(finished_at);
        progression.updated_at = finished_at;
        Ok(progression.clone())
    }

    /// Force-finishes a user's unfinished progressions on one task. Rows on
    /// other tasks are untouched.
    pub fn finish_all_unfinished(
        db: &mut Database,
        task_id: Uuid,
        user_id: Uuid,
        finished_at: DateTime<Utc>,
    ) -> usize {
        let mut finished = 0;
        for progression in db.progressions.values_mut() {
            if progression.task_id == task_id && progression.user_id == user_id && !progression.finished
            {
                progression.finished = true;
                progression.finished_at = Some(finished_at);
                progression.updated_at = finished_at;
                finished += 1;
            }
        }
        finished
    }

    pub fn delete(db: &mut Database, progression_id: Uuid) -> Result<(), StoreError> {
        db.progressions
            .remove(&progression_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                table: "progressions",
            })
    }
}
