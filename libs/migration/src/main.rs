use migration::Migrator;
use sea_orm_migration::cli;

/// `migration up | down | status | fresh`, connecting via `DATABASE_URL`.
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
