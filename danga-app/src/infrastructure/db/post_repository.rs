use super::entities::{post, Post};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a post that has not been soft-deleted.
    pub async fn find_live(&self, id: Uuid) -> Result<Option<post::Model>, DbErr> {
        Post::find_by_id(id)
            .filter(post::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    pub async fn list_recent(&self, limit: u64) -> Result<Vec<post::Model>, DbErr> {
        Post::find()
            .filter(post::Column::DeletedAt.is_null())
            .order_by_desc(post::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }
}
