//! Authentication module
//!
//! Provides JWT token issuing/verification and the bearer auth middleware.

pub mod jwt;
pub mod middleware;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims};
pub use middleware::{auth_middleware, AuthState, AuthenticatedUser};
