use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, User, now},
    repository::UserRepository,
};

/// SeaORM-backed [`UserRepository`].
///
/// Uniqueness of active emails is enforced by the partial index
/// `idx_users_email_active`; a violation surfaces as `DuplicateEmail`.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active() -> sea_orm::Select<entity::Entity> {
        entity::Entity::find().filter(entity::Column::DeletedAt.is_null())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let user = User::new(input);

        let model = entity::ActiveModel::from(&user)
            .insert(&self.db)
            .await
            .map_err(|e| UserError::from_db(e, &user.email))?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = Self::active()
            .filter(entity::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = Self::active()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, offset: u64, limit: u64) -> UserResult<(Vec<User>, u64)> {
        let total = Self::active().count(&self.db).await?;

        // Past the last row there is nothing to fetch, and Postgres binds
        // OFFSET as i64.
        if offset >= total {
            return Ok((Vec::new(), total));
        }

        let models = Self::active()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, user: &User) -> UserResult<User> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(user.name.clone()))
            .col_expr(entity::Column::Email, Expr::value(user.email.clone()))
            .col_expr(
                entity::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(user.updated_at)),
            )
            .filter(entity::Column::Id.eq(user.id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| UserError::from_db(e, &user.email))?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(user.id));
        }

        tracing::info!(user_id = %user.id, "Updated user");

        // Re-read so the caller sees the timestamp the database settled on.
        self.get_by_id(user.id)
            .await?
            .ok_or(UserError::NotFound(user.id))
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::update_many()
            .col_expr(
                entity::Column::DeletedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(now())),
            )
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Soft-deleted user");
        }

        Ok(result.rows_affected > 0)
    }
}
