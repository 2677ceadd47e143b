//! Connection management for the relational store behind the users API.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL via SeaORM, plus migration running
//! - `config` - build [`postgres::PostgresConfig`] from `DB_*` environment variables
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use database::common::RetryPolicy;
//!
//! let db = postgres::connect_with_retry(PostgresConfig::from_env()?, RetryPolicy::default()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "users_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryPolicy};
