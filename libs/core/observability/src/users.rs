//! Counters for the users domain.

use metrics::{counter, histogram};
use std::time::Duration;

/// Users metrics recorder
pub struct UserMetrics;

impl UserMetrics {
    /// Record one service call.
    ///
    /// `outcome` is `success` or the snake_case error kind (`not_found`,
    /// `conflict`, `validation`, `internal`).
    pub fn record_operation(operation: &'static str, outcome: &'static str, duration: Duration) {
        counter!(
            "users_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        histogram!("users_operation_duration_seconds", "operation" => operation)
            .record(duration.as_secs_f64());

        tracing::debug!(
            operation,
            outcome,
            duration_ms = duration.as_millis() as u64,
            "User operation recorded"
        );
    }
}
