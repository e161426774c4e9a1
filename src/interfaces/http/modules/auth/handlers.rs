//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LoginResponse};
use crate::application::UserService;
use crate::auth::jwt::{create_token, JwtConfig};
use crate::interfaces::http::common::{internal_error, ApiError, ErrorResponse, ValidatedJson};
use crate::interfaces::http::modules::users::UserDto;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub service: Arc<dyn UserService>,
    pub jwt_config: JwtConfig,
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unknown email", body = ErrorResponse),
        (status = 500, description = "Service failure", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .service
        .get_by_email(&request.email)
        .await
        .map_err(internal_error)?;

    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid credentials")),
        ));
    };

    let token = create_token(&user.id.to_string(), &user.email, &state.jwt_config)
        .map_err(|e| {
            tracing::error!("token signing failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
        })?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_seconds,
        user: UserDto::from(user),
    }))
}
