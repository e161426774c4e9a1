use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    let id = Uuid::parse_str(&model.id)
        .map_err(|e| DomainError::Storage(format!("Invalid user id in store: {}", e)))?;

    Ok(User {
        id,
        name: model.name,
        email: model.email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    // SQLite says "UNIQUE constraint failed", Postgres "duplicate key
    // value", MySQL "Duplicate entry"
    let msg = e.to_string().to_lowercase();
    msg.contains("unique") || msg.contains("duplicate")
}


// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let new_user = user::ActiveModel {
            id: Set(id.to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        user_model_to_domain(inserted)
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find().all(&self.db).await.map_err(db_err)?;

        models.into_iter().map(user_model_to_domain).collect()
    }

    async fn get_user_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(user_model_to_domain).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(user_model_to_domain).transpose()
    }

    async fn update_user(&self, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(dto.id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(dto.name);
        active.email = Set(dto.email);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        user_model_to_domain(updated).map(Some)
    }

    async fn delete_user(&self, id: Uuid) -> DomainResult<bool> {
        let result = user::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
