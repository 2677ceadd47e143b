//! Lenient `?page=&per_page=` extractor.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

/// Raw query parameters, kept as strings so bad input never rejects the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>, minimum = 1, example = 1)]
    pub page: Option<String>,
    /// Items per page (default 10, capped at 100)
    #[param(value_type = Option<u64>, minimum = 1, maximum = 100, example = 10)]
    pub per_page: Option<String>,
}

/// Normalized page request.
///
/// Missing, non-numeric, or zero values fall back to the defaults and
/// `per_page` is clamped to [`MAX_PER_PAGE`]. Extraction never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    /// Zero selects the default, `per_page` above the cap is clamped.
    pub fn new(page: u64, per_page: u64) -> Self {
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };

        Self {
            page,
            per_page: per_page.min(MAX_PER_PAGE),
        }
    }

    pub fn from_query(query: &PaginationQuery) -> Self {
        Self::new(
            parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            parse_positive(query.per_page.as_deref()).unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// `ceil(total / per_page)`, zero when there is nothing to page through.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PER_PAGE)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v >= 1)
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or_default();

        Ok(Self::from_query(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Pagination {
        let (mut parts, _) = Request::get(uri).body(()).unwrap().into_parts();
        Pagination::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_defaults_when_absent() {
        assert_eq!(extract("/users").await, Pagination::new(1, 10));
    }

    #[tokio::test]
    async fn test_explicit_values() {
        assert_eq!(extract("/users?page=3&per_page=25").await, Pagination::new(3, 25));
    }

    #[tokio::test]
    async fn test_invalid_values_fall_back() {
        assert_eq!(extract("/users?page=abc&per_page=-5").await, Pagination::default());
        assert_eq!(extract("/users?page=0&per_page=0").await, Pagination::default());
    }

    #[tokio::test]
    async fn test_per_page_is_capped() {
        assert_eq!(extract("/users?per_page=1000").await.per_page, MAX_PER_PAGE);
    }

    #[tokio::test]
    async fn test_duplicate_keys_do_not_reject() {
        assert_eq!(extract("/users?page=2&page=3").await, Pagination::default());
    }

    #[test]
    fn test_offset_and_total_pages() {
        let p = Pagination::new(3, 10);
        assert_eq!(p.offset(), 20);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
        assert_eq!(Pagination::new(1, 3).total_pages(7), 3);
    }

    #[test]
    fn test_zero_selects_defaults() {
        assert_eq!(Pagination::new(0, 0), Pagination::default());
        assert_eq!(Pagination::new(2, 500).per_page, MAX_PER_PAGE);
    }
}
