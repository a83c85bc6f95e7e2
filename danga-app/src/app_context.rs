use crate::application::{CommentService, PostQueries, ReportService, VoteService};
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{
    create_connection, CommentRepository, PostRepository, ProfileRepository, ReportRepository,
    VoteRepository,
};
use crate::infrastructure::security::RateLimiter;
use danga_errors::AppError;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppContext {
    pub votes: VoteService,
    pub comments: CommentService,
    pub reports: ReportService,
    pub posts: PostQueries,
    pub profiles: ProfileRepository,
    pub rate_limiter: RateLimiter,
    /// `None` when Google sign-in is not configured.
    pub oauth: Option<GoogleOAuth>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, oauth: Option<GoogleOAuth>) -> Self {
        let post_repo = PostRepository::new(db.clone());
        let profile_repo = ProfileRepository::new(db.clone());
        let comment_repo = CommentRepository::new(db.clone());
        let votes = VoteService::new(VoteRepository::new(db.clone()), post_repo.clone());
        let comments = CommentService::new(
            comment_repo.clone(),
            post_repo.clone(),
            profile_repo.clone(),
        );
        let reports = ReportService::new(ReportRepository::new(db), post_repo.clone(), comment_repo);

        Self {
            posts: PostQueries::new(post_repo, profile_repo.clone(), votes.clone(), comments.clone()),
            votes,
            comments,
            reports,
            profiles: profile_repo,
            rate_limiter: RateLimiter::new(),
            oauth,
        }
    }

    pub async fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Internal("DATABASE_URL must be set".to_string()))?;

        let oauth = GoogleOAuth::from_env()?;

        let db = create_connection(&database_url).await.map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            AppError::Internal("database connection failed".to_string())
        })?;

        tracing::info!("Connected to database");
        Ok(Self::new(db, oauth))
    }
}
