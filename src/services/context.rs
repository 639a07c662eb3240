use uuid::Uuid;

use crate::db::models::user::User;

/// Resolved actor for one inbound request. Authentication itself happens
/// upstream; by the time a service runs, the actor is a known user (possibly
/// without a role).
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub actor: User,
}

impl RequestContext {
    pub fn new(actor: User) -> Self {
        Self { actor }
    }

    pub fn actor_id(&self) -> Uuid {
        self.actor.id
    }
}
