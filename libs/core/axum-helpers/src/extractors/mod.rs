//! Custom extractors for Axum handlers.

pub mod pagination;
pub mod uuid_path;
pub mod validated_json;

pub use pagination::{Pagination, PaginationQuery};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
