//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::UserService;
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::common::{ErrorResponse, FieldError, ValidationErrorResponse};

use super::modules::{auth, health, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        // Users
        users::get_all_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            FieldError,
            ValidationErrorResponse,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Token issuing (JWT bearer)"),
        (name = "Users", description = "User CRUD operations"),
    ),
    info(
        title = "Users API",
        version = "1.0.0",
        description = "CRUD REST API for managing user records",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(service: Arc<dyn UserService>, jwt_config: JwtConfig) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // User routes (protected by the bearer middleware)
    let users_state = users::UsersState {
        service: service.clone(),
    };
    let user_routes = Router::new()
        .route(
            "/",
            get(users::get_all_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route(
            "/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(users_state);

    // Auth routes (public)
    let auth_state = auth::AuthHandlerState {
        service,
        jwt_config,
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth_state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api", auth_routes)
        // Users
        .nest("/api/users", user_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
