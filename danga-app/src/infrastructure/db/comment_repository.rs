use super::entities::{comment, Comment};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Row to insert. `depth` and `reply_to_user_id` are decided by the caller.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub parent_id: Option<Uuid>,
    pub depth: i16,
    pub reply_to_user_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct CommentRepository {
    db: DatabaseConnection,
}

impl CommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new_comment: NewComment) -> Result<comment::Model, DbErr> {
        let active = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(new_comment.post_id),
            user_id: Set(new_comment.user_id),
            body: Set(new_comment.body),
            parent_id: Set(new_comment.parent_id),
            depth: Set(new_comment.depth),
            reply_to_user_id: Set(new_comment.reply_to_user_id),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<comment::Model>, DbErr> {
        Comment::find_by_id(id).one(&self.db).await
    }

    pub async fn list_active_for_post(&self, post_id: Uuid) -> Result<Vec<comment::Model>, DbErr> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::DeletedAt.is_null())
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Marks the comment deleted unless it already is. Returns whether a row
    /// changed.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = Comment::update_many()
            .col_expr(comment::Column::DeletedAt, Expr::value(chrono::Utc::now()))
            .filter(comment::Column::Id.eq(id))
            .filter(comment::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
