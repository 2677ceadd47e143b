use async_trait::async_trait;
use axum_helpers::Pagination;
use observability::UserMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserListResponse};
use crate::repository::UserRepository;

/// Business-rule port consumed by the HTTP handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserOperations: Send + Sync + 'static {
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    async fn get(&self, id: Uuid) -> UserResult<User>;

    /// Zero `page`/`per_page` select the defaults; `per_page` is capped at 100.
    async fn list(&self, page: u64, per_page: u64) -> UserResult<UserListResponse>;

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User>;

    async fn delete(&self, id: Uuid) -> UserResult<()>;
}

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user after checking the email is not held by an active user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let input = input.normalized();
        input.validate()?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        self.repository.create(input).await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self, page: u64, per_page: u64) -> UserResult<UserListResponse> {
        let pagination = Pagination::new(page, per_page);

        let (users, total) = self
            .repository
            .list(pagination.offset(), pagination.per_page)
            .await?;

        Ok(UserListResponse {
            data: users.into_iter().map(Into::into).collect(),
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages(total),
        })
    }

    /// Apply a partial update; a changed email must not belong to another active user
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let input = input.normalized();
        input.validate()?;

        let mut user = self.get_user(id).await?;

        if let Some(email) = input.email.as_deref().filter(|e| *e != user.email) {
            if let Some(other) = self.repository.get_by_email(email).await? {
                if other.id != id {
                    return Err(UserError::DuplicateEmail(email.to_string()));
                }
            }
        }

        user.apply_update(input);
        self.repository.update(&user).await
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

async fn observed<T>(
    operation: &'static str,
    call: impl Future<Output = UserResult<T>>,
) -> UserResult<T> {
    let started = Instant::now();
    let result = call.await;

    let outcome = match &result {
        Ok(_) => "success",
        Err(UserError::Internal(msg)) => {
            tracing::error!(operation, error = %msg, "User operation failed");
            "internal"
        }
        Err(e) => e.kind(),
    };
    UserMetrics::record_operation(operation, outcome, started.elapsed());

    result
}

#[async_trait]
impl<R: UserRepository + 'static> UserOperations for UserService<R> {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        observed("create", self.create_user(input)).await
    }

    async fn get(&self, id: Uuid) -> UserResult<User> {
        observed("get", self.get_user(id)).await
    }

    async fn list(&self, page: u64, per_page: u64) -> UserResult<UserListResponse> {
        observed("list", self.list_users(page, per_page)).await
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        observed("update", self.update_user(id, input)).await
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        observed("delete", self.delete_user(id)).await
    }
}
