use crate::domain::{validate_comment_body, Comment};
use crate::infrastructure::db::entities::comment;
use crate::infrastructure::db::{
    db_error, CommentRepository, NewComment, PostRepository, ProfileRepository,
};
use danga_errors::AppError;
use uuid::Uuid;

/// Where a new comment sits in its thread, derived from the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPlacement {
    pub depth: i16,
    pub reply_to_user_id: Option<Uuid>,
}

/// Decides the depth of a new comment on `post_id`.
///
/// `parent` is the row found for `parent_id`, if any. Replies may only
/// target live top-level comments of the same post.
pub fn reply_placement(
    post_id: Uuid,
    parent_id: Option<Uuid>,
    parent: Option<&comment::Model>,
) -> Result<ReplyPlacement, AppError> {
    if parent_id.is_none() {
        return Ok(ReplyPlacement {
            depth: 0,
            reply_to_user_id: None,
        });
    }

    let parent = parent
        .filter(|parent| parent.post_id == post_id && parent.is_active())
        .ok_or_else(|| AppError::NotFound("답글 대상 댓글을 찾을 수 없습니다.".to_string()))?;

    if parent.depth != 0 || parent.parent_id.is_some() {
        return Err(AppError::Validation(
            "답글에는 답글을 달 수 없습니다.".to_string(),
        ));
    }

    Ok(ReplyPlacement {
        depth: 1,
        reply_to_user_id: Some(parent.user_id),
    })
}

/// Checks that `user_id` may delete `target`.
pub fn deletion_check(user_id: Uuid, target: Option<&comment::Model>) -> Result<(), AppError> {
    let target = target
        .filter(|target| target.is_active())
        .ok_or_else(|| AppError::NotFound("삭제할 댓글을 찾을 수 없습니다.".to_string()))?;

    if target.user_id != user_id {
        return Err(AppError::Forbidden(
            "본인 댓글만 삭제할 수 있습니다.".to_string(),
        ));
    }

    Ok(())
}

#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    posts: PostRepository,
    profiles: ProfileRepository,
}

impl CommentService {
    pub fn new(
        comments: CommentRepository,
        posts: PostRepository,
        profiles: ProfileRepository,
    ) -> Self {
        Self {
            comments,
            posts,
            profiles,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        raw_body: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Comment, AppError> {
        let body = validate_comment_body(raw_body)?;

        self.posts
            .find_live(post_id)
            .await
            .map_err(db_error("posts.find", "게시글을 확인하지 못했습니다."))?
            .ok_or_else(|| {
                AppError::NotFound("댓글 대상 게시글을 찾을 수 없습니다.".to_string())
            })?;

        let parent = match parent_id {
            Some(id) => self
                .comments
                .find_by_id(id)
                .await
                .map_err(db_error("comments.find", "답글 대상 댓글을 확인하지 못했습니다."))?,
            None => None,
        };
        let placement = reply_placement(post_id, parent_id, parent.as_ref())?;

        let created = self
            .comments
            .create(NewComment {
                post_id,
                user_id,
                body,
                parent_id,
                depth: placement.depth,
                reply_to_user_id: placement.reply_to_user_id,
            })
            .await
            .map_err(db_error(
                "comments.insert",
                "댓글 저장에 실패했습니다. 잠시 후 다시 시도해주세요.",
            ))?;

        let label = self
            .profiles
            .find_by_id(user_id)
            .await
            .map_err(db_error("profiles.find", "작성자 정보를 불러오지 못했습니다."))?
            .and_then(|profile| profile.nickname);

        tracing::info!(comment_id = %created.id, %post_id, depth = created.depth, "comment created");
        Ok(created.into_domain(label))
    }

    pub async fn delete(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), AppError> {
        let target = self
            .comments
            .find_by_id(comment_id)
            .await
            .map_err(db_error("comments.find", "댓글을 확인하지 못했습니다."))?;

        deletion_check(user_id, target.as_ref())?;

        let changed = self
            .comments
            .soft_delete(comment_id)
            .await
            .map_err(db_error(
                "comments.delete",
                "댓글 삭제에 실패했습니다. 잠시 후 다시 시도해주세요.",
            ))?;

        if !changed {
            return Err(AppError::NotFound("삭제할 댓글을 찾을 수 없습니다.".to_string()));
        }

        tracing::info!(%comment_id, "comment soft-deleted");
        Ok(())
    }

    /// Active comments of a post with author nicknames resolved.
    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let rows = self
            .comments
            .list_active_for_post(post_id)
            .await
            .map_err(db_error("comments.list", "댓글을 불러오지 못했습니다."))?;

        let mut author_ids: Vec<Uuid> = rows.iter().map(|row| row.user_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let nicknames = self
            .profiles
            .nicknames(&author_ids)
            .await
            .map_err(db_error("profiles.list", "작성자 정보를 불러오지 못했습니다."))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let label = nicknames.get(&row.user_id).cloned();
                row.into_domain(label)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(post_id: Uuid, parent: Option<&comment::Model>) -> comment::Model {
        comment::Model {
            id: Uuid::new_v4(),
            post_id,
            user_id: Uuid::new_v4(),
            body: "body".to_string(),
            parent_id: parent.map(|p| p.id),
            depth: parent.map_or(0, |p| p.depth + 1),
            reply_to_user_id: parent.map(|p| p.user_id),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_top_level_placement() {
        let placement = reply_placement(Uuid::new_v4(), None, None).unwrap();
        assert_eq!(placement, ReplyPlacement { depth: 0, reply_to_user_id: None });
    }

    #[test]
    fn test_reply_placement_points_at_parent_author() {
        let post = Uuid::new_v4();
        let parent = row(post, None);
        let placement = reply_placement(post, Some(parent.id), Some(&parent)).unwrap();
        assert_eq!(placement.depth, 1);
        assert_eq!(placement.reply_to_user_id, Some(parent.user_id));
    }

    #[test]
    fn test_reply_to_reply_is_rejected() {
        let post = Uuid::new_v4();
        let parent = row(post, None);
        let reply = row(post, Some(&parent));
        assert!(matches!(
            reply_placement(post, Some(reply.id), Some(&reply)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_foreign_or_deleted_parent_is_not_found() {
        let post = Uuid::new_v4();
        let foreign = row(Uuid::new_v4(), None);
        let mut deleted = row(post, None);
        deleted.deleted_at = Some(Utc::now());

        assert!(matches!(
            reply_placement(post, Some(Uuid::new_v4()), None),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            reply_placement(post, Some(foreign.id), Some(&foreign)),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            reply_placement(post, Some(deleted.id), Some(&deleted)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_only_author_may_delete() {
        let target = row(Uuid::new_v4(), None);
        assert!(deletion_check(target.user_id, Some(&target)).is_ok());
        assert!(matches!(
            deletion_check(Uuid::new_v4(), Some(&target)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_deleting_twice_is_not_found() {
        let mut target = row(Uuid::new_v4(), None);
        target.deleted_at = Some(Utc::now());
        assert!(matches!(
            deletion_check(target.user_id, Some(&target)),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(deletion_check(Uuid::new_v4(), None), Err(AppError::NotFound(_))));
    }
}
