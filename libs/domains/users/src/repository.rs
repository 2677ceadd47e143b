use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User, now};

/// Storage port for users.
///
/// Every read ignores soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; `DuplicateEmail` if an active user owns the email
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Lookup by normalized email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Active users ordered by `created_at`, then `id`, with the total count
    async fn list(&self, offset: u64, limit: u64) -> UserResult<(Vec<User>, u64)>;

    /// Persist name, email and `updated_at`; `NotFound` if the user is gone
    async fn update(&self, user: &User) -> UserResult<User>;

    /// Soft delete; `false` when there was no active user with this id
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| !u.is_deleted() && u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &input.email, None) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let user = User::new(input);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted() && u.email == email)
            .cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> UserResult<(Vec<User>, u64)> {
        let users = self.users.read().await;

        let mut active: Vec<&User> = users.values().filter(|u| !u.is_deleted()).collect();
        active.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let total = active.len() as u64;
        let page = active
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update(&self, user: &User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, Some(user.id)) {
            return Err(UserError::DuplicateEmail(user.email.clone()));
        }

        let stored = users
            .get_mut(&user.id)
            .filter(|u| !u.is_deleted())
            .ok_or(UserError::NotFound(user.id))?;

        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.updated_at = user.updated_at;

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(&id).filter(|u| !u.is_deleted()) {
            Some(user) => {
                user.deleted_at = Some(now());
                tracing::info!(user_id = %id, "Soft-deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpdateUser;

    fn input(name: &str, email: &str) -> CreateUser {
        CreateUser::new(name, email)
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(input("John", "john@example.com")).await.unwrap();
        assert_eq!(user.name, "John");
        assert_eq!(user.created_at, user.updated_at);

        let fetched = repo.get_by_id(user.id).await.unwrap();
        assert_eq!(fetched, Some(user.clone()));

        let by_email = repo.get_by_email("john@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();
        repo.create(input("John", "john@example.com")).await.unwrap();

        let result = repo.create(input("Other", "john@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_user_and_frees_email() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(input("John", "john@example.com")).await.unwrap();

        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());

        assert_eq!(repo.get_by_id(user.id).await.unwrap(), None);
        assert_eq!(repo.get_by_email("john@example.com").await.unwrap(), None);
        assert_eq!(repo.list(0, 10).await.unwrap().1, 0);

        let again = repo.create(input("John", "john@example.com")).await.unwrap();
        assert_ne!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_list_orders_by_creation_and_pages() {
        let repo = InMemoryUserRepository::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            let user = repo
                .create(input("User", &format!("user{i}@example.com")))
                .await
                .unwrap();
            ids.push(user.id);
        }

        let (first, total) = repo.list(0, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(first.iter().map(|u| u.id).collect::<Vec<_>>(), ids[..2]);

        let (last, _) = repo.list(4, 2).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, ids[4]);

        let (beyond, total) = repo.list(10, 2).await.unwrap();
        assert!(beyond.is_empty());
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn test_update_deleted_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.create(input("John", "john@example.com")).await.unwrap();
        repo.delete(user.id).await.unwrap();

        user.apply_update(UpdateUser {
            name: Some("Johnny".into()),
            email: None,
        });

        let result = repo.update(&user).await;
        assert!(matches!(result, Err(UserError::NotFound(id)) if id == user.id));
    }
}
