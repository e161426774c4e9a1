//! User service
//!
//! The HTTP layer only ever sees the `UserService` trait; the
//! database-backed implementation lives behind it so handlers can be
//! exercised against an in-memory double in tests.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    CreateUserDto, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
};

/// User service interface consumed by the HTTP handlers.
///
/// `post` and `put` return `None` when the operation could not be applied
/// (duplicate email on create, unknown id on update); `delete` reports
/// whether a row was actually removed.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_all(&self) -> DomainResult<Vec<User>>;
    async fn get(&self, id: Uuid) -> DomainResult<Option<User>>;
    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn post(&self, dto: CreateUserDto) -> DomainResult<Option<User>>;
    async fn put(&self, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}

/// Database-backed `UserService` delegating to the user repository.
pub struct DbUserService {
    repo: Arc<dyn UserRepositoryInterface>,
}

impl DbUserService {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for DbUserService {
    async fn get_all(&self) -> DomainResult<Vec<User>> {
        self.repo.list_users().await
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_email(email).await
    }

    async fn post(&self, dto: CreateUserDto) -> DomainResult<Option<User>> {
        // Duplicate email is not an error at this level: the controller
        // answers 400 for a `None` result.
        if self.repo.get_user_by_email(&dto.email).await?.is_some() {
            return Ok(None);
        }

        let created = self.repo.create_user(dto).await?;
        Ok(Some(created))
    }

    async fn put(&self, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        self.repo.update_user(dto).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        self.repo.delete_user(id).await
    }
}
