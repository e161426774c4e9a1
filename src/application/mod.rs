//! Application layer: use cases built on top of the domain traits

pub mod users;

pub use users::{DbUserService, UserService};
