use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::user::User;
use crate::db::repositories::users::UserRepo;
use crate::services::context::RequestContext;

/// Header carrying the authenticated user id. Real authentication lives in an
/// upstream gateway; this resolves the header to a user row and rejects
/// unknown or missing ids.
pub const ACTOR_HEADER: &str = "x-user-id";

pub async fn actor_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Response {
    let user_id = request
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok());

    let Some(user_id) = user_id else {
        return unauthorized("Missing or malformed x-user-id header");
    };

    let user = {
        let db = state.store.read();
        UserRepo::find(&db, user_id)
    };
    let Some(user) = user else {
        return unauthorized("Unknown user");
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::unauthorized(message)),
    )
        .into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(RequestContext::new)
            .ok_or_else(|| unauthorized("Not authenticated"))
    }
}
