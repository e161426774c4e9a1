//! User management use cases

pub mod service;

pub use service::{DbUserService, UserService};
