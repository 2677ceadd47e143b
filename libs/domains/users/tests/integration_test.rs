//! Integration tests for Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - SeaORM queries match the migrated schema
//! - The partial unique index only covers active rows
//! - Soft delete hides rows without removing them
//! - The service rules hold against the real repository

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = CreateUser::new(builder.name("user", "main"), builder.email("main"));

    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.email, input.email);
    assert_eq!(created.created_at, created.updated_at);
    assert!(created.deleted_at.is_none());

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "user should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved user id");
    assert_eq!(retrieved, created);

    let by_email = assert_some(
        repo.get_by_email(&input.email).await.unwrap(),
        "user should be found by email",
    );
    assert_uuid_eq(by_email.id, created.id, "user found by email");
}

#[tokio::test]
async fn test_unique_index_rejects_active_duplicate() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_index");

    repo.create(CreateUser::new("First", builder.email("dup")))
        .await
        .unwrap();

    // The repository itself does not pre-check; the index must catch it.
    let result = repo
        .create(CreateUser::new("Second", builder.email("dup")))
        .await;

    assert!(
        matches!(result, Err(UserError::DuplicateEmail(_))),
        "expected DuplicateEmail, got {result:?}"
    );
}

#[tokio::test]
async fn test_soft_delete_keeps_row_and_frees_email() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("soft_delete");
    let email = builder.email("main");

    let user = repo.create(CreateUser::new("John", email.clone())).await.unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap(), "second delete is a no-op");

    assert!(repo.get_by_id(user.id).await.unwrap().is_none());
    assert!(repo.get_by_email(&email).await.unwrap().is_none());

    let again = repo.create(CreateUser::new("John", email.clone())).await.unwrap();
    assert_ne!(again.id, user.id);

    // Both rows are still stored; only one is visible.
    assert_eq!(db.count_rows_with_email(&email).await, 2);
    let (users, total) = repo.list(0, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_uuid_eq(users[0].id, again.id, "only the active user is listed");
}

#[tokio::test]
async fn test_list_orders_by_created_at_then_id() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    let mut ids = Vec::new();
    for i in 0..5 {
        let user = repo
            .create(CreateUser::new(
                builder.name("user", &i.to_string()),
                builder.email(&i.to_string()),
            ))
            .await
            .unwrap();
        ids.push(user.id);
    }

    let (page, total) = repo.list(2, 2).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.iter().map(|u| u.id).collect::<Vec<_>>(), ids[2..4]);

    let (beyond, total) = repo.list(10, 2).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 5);
}

#[tokio::test]
async fn test_update_advances_updated_at() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_timestamp");

    let mut user = repo
        .create(CreateUser::new("John", builder.email("main")))
        .await
        .unwrap();
    let original = user.clone();

    user.apply_update(UpdateUser {
        name: Some("Johnny".into()),
        email: None,
    });
    let updated = repo.update(&user).await.unwrap();

    assert_eq!(updated.name, "Johnny");
    assert_eq!(updated.email, original.email);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
}

#[tokio::test]
async fn test_update_of_deleted_user_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_deleted");

    let mut user = repo
        .create(CreateUser::new("John", builder.email("main")))
        .await
        .unwrap();
    repo.delete(user.id).await.unwrap();

    user.apply_update(UpdateUser {
        name: Some("Ghost".into()),
        email: None,
    });

    assert!(matches!(repo.update(&user).await, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_rows_inserted_outside_the_app_are_readable() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let id = db.create_test_user("Seeded", "seeded@example.com").await;

    let user = assert_some(repo.get_by_id(id).await.unwrap(), "seeded user");
    assert_eq!(user.email, "seeded@example.com");
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_flow_against_postgres() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_flow");

    let john = service
        .create_user(CreateUser::new("John", builder.email("john")))
        .await
        .unwrap();
    let jane = service
        .create_user(CreateUser::new("Jane", builder.email("jane")))
        .await
        .unwrap();

    let conflict = service
        .update_user(
            john.id,
            UpdateUser {
                name: None,
                email: Some(jane.email.clone()),
            },
        )
        .await;
    assert!(matches!(conflict, Err(UserError::DuplicateEmail(_))));

    service.delete_user(jane.id).await.unwrap();

    // Jane's email is free again once she is deleted.
    let moved = service
        .update_user(
            john.id,
            UpdateUser {
                name: None,
                email: Some(jane.email.clone()),
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.email, jane.email);

    let page = service.list_users(1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);

    let missing = service.get_user(Uuid::now_v7()).await;
    assert!(matches!(missing, Err(UserError::NotFound(_))));
}
