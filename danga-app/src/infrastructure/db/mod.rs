pub mod entities;
mod comment_repository;
mod post_repository;
mod profile_repository;
mod report_repository;
mod vote_repository;

pub use comment_repository::{CommentRepository, NewComment};
pub use post_repository::PostRepository;
pub use profile_repository::ProfileRepository;
pub use report_repository::ReportRepository;
pub use vote_repository::VoteRepository;

use danga_errors::AppError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Logs a database failure under `context` and turns it into a user-facing
/// error that does not leak SQL details.
pub fn db_error(context: &'static str, message: &'static str) -> impl FnOnce(DbErr) -> AppError {
    move |err| {
        tracing::error!(context, error = %err, "database call failed");
        AppError::Internal(message.to_string())
    }
}
