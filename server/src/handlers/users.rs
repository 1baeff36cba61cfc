//! `/users` resource handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, INVALID_USER_ID, USER_NOT_FOUND};
use crate::utils::response::{created, message, MessageBody};
use crate::validation::validate_user;

/// Path ids must be plain base-10 integers; anything else is rejected before
/// the store is touched.
pub fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::ValidationError(INVALID_USER_ID.to_string()))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to fetch users"))?;

    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let input = validate_user(&body)?;

    let user = state
        .users
        .create(input)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to create user"))?;

    tracing::info!(user_id = user.id, "User created");

    Ok(created(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(raw_id) = path?;
    let id = parse_user_id(&raw_id)?;

    let user = state
        .users
        .get(id)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to fetch user"))?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Path(raw_id) = path?;
    let id = parse_user_id(&raw_id)?;
    let Json(body) = payload?;
    let input = validate_user(&body)?;

    let user = state
        .users
        .update(id, input)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to update user"))?;

    tracing::info!(user_id = user.id, "User updated");

    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, AppError> {
    let Path(raw_id) = path?;
    let id = parse_user_id(&raw_id)?;

    state
        .users
        .delete(id)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to delete user"))?;

    tracing::info!(user_id = id, "User deleted");

    Ok(message("User deleted successfully"))
}
