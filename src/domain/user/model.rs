use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User model
///
/// The id is assigned on creation and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
