//! Users Domain
//!
//! CRUD over a single `users` resource with soft delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON envelopes
//! └──────┬──────┘
//!        │ UserOperations
//! ┌──────▼──────┐
//! │   Service   │  ← Uniqueness rules, pagination math
//! └──────┬──────┘
//!        │ UserRepository
//! ┌──────▼──────┐
//! │ Repository  │  ← PostgreSQL (SeaORM) or in-memory
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUser, MessageResponse, UpdateUser, User, UserEnvelope, UserListResponse, UserResponse,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{UserOperations, UserService};
