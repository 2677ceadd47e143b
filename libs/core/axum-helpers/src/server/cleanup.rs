//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Close a SeaORM pool, logging the outcome.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!("PostgreSQL connection '{}' closed", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}

/// Runs named cleanup tasks concurrently and waits for all of them.
#[derive(Default)]
pub struct CleanupCoordinator {
    tasks: Vec<(&'static str, tokio::task::JoinHandle<()>)>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` immediately and track it under `name`.
    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, tokio::spawn(task)));
    }

    /// A panicking task is logged and does not stop the others.
    pub async fn run(self) {
        for (name, handle) in self.tasks {
            match handle.await {
                Ok(_) => info!("Cleanup task '{}' completed", name),
                Err(e) => error!("Cleanup task '{}' failed: {}", name, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn failing_cleanup() {
        panic!("cleanup failed")
    }

    #[tokio::test]
    async fn test_runs_all_tasks_even_if_one_panics() {
        let done = Arc::new(AtomicU32::new(0));
        let mut cleanup = CleanupCoordinator::new();

        let counter = done.clone();
        cleanup.add_task("ok", async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cleanup.add_task("boom", failing_cleanup());
        let counter = done.clone();
        cleanup.add_task("ok-too", async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cleanup.run().await;

        assert_eq!(done.load(Ordering::SeqCst), 2);
    }
}
