use super::{Comment, VoteSummary};
use serde::{Deserialize, Serialize};

/// Post with the fields a card needs to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCard {
    pub id: uuid::Uuid,
    pub caption: Option<String>,
    pub image_url: String,
    pub author_label: Option<String>,
    pub votes: VoteSummary,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Server-rendered snapshot of a post page: the card plus its active comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: PostCard,
    pub comments: Vec<Comment>,
}

/// The signed-in user as the UI sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: uuid::Uuid,
    pub label: Option<String>,
}
