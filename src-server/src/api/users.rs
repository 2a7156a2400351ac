use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use salesdesk_core::errors::Error as CoreError;
use salesdesk_core::users::users_model::User;
use salesdesk_core::users::users_traits::UserServiceTrait;

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.get_users()?;
    Ok(Json(users))
}

async fn get_user(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let directory = state.user_service.directory()?;
    let user = directory
        .get(&uid)
        .cloned()
        .ok_or_else(|| CoreError::NotFound(format!("User '{}'", uid)))?;
    Ok(Json(user))
}

async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.upsert_user(user).await?;
    // Directory data changed; drop any cached copy.
    state.user_cache.invalidate(&user.uid);
    Ok(Json(user))
}

async fn delete_user(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.user_service.delete_user(uid.clone()).await?;
    state.user_cache.invalidate(&uid);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(get_users).post(upsert_user))
        .route("/users/{uid}", get(get_user).delete(delete_user))
}
