//! Application state management.
//!
//! This module defines the shared application state passed to request handlers.
//! The state contains:
//! - Configuration
//! - The PostgreSQL connection pool

/// Shared application state.
///
/// Cloned per handler; the pool is reference counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
