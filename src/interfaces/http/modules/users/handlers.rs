//! User management API handlers
//!
//! CRUD endpoints over user records. Each handler validates the request
//! model, delegates to the `UserService` interface and maps the outcome
//! to an HTTP status code.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::interfaces::http::common::{
    internal_error, ApiError, ErrorResponse, ValidatedJson,
};

/// User handler state
#[derive(Clone)]
pub struct UsersState {
    pub service: Arc<dyn UserService>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Service failure", body = ErrorResponse)
    )
)]
pub async fn get_all_users(
    State(state): State<UsersState>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    match state.service.get_all().await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 204, description = "User not found"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Service failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<UsersState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match state.service.get(id).await {
        Ok(Some(user)) => Ok(Json(UserDto::from(user)).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created, Location points at the new resource", body = UserDto),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Service failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<UserDto>), ApiError> {
    match state.service.post(request.into()).await {
        Ok(Some(user)) => {
            let location = format!("/api/users/{}", user.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(UserDto::from(user)),
            ))
        }
        Ok(None) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("User could not be created")),
        )),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error or unknown id"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Service failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserDto>, ApiError> {
    match state.service.put(request.into()).await {
        Ok(Some(user)) => Ok(Json(UserDto::from(user))),
        Ok(None) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("User could not be updated")),
        )),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deletion result", body = bool),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Service failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<UsersState>,
    Path(id): Path<Uuid>,
) -> Result<Json<bool>, ApiError> {
    match state.service.delete(id).await {
        Ok(deleted) => Ok(Json(deleted)),
        Err(e) => Err(internal_error(e)),
    }
}
