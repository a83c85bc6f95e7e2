use super::{CommentService, VoteService};
use crate::domain::{vote_summary_for, PostCard, PostDetail};
use crate::infrastructure::db::entities::post;
use crate::infrastructure::db::{db_error, PostRepository, ProfileRepository};
use danga_errors::AppError;
use std::collections::HashMap;
use uuid::Uuid;

const FEED_PAGE_SIZE: u64 = 24;

/// Read side for the feed and post pages.
#[derive(Clone)]
pub struct PostQueries {
    posts: PostRepository,
    profiles: ProfileRepository,
    votes: VoteService,
    comments: CommentService,
}

impl PostQueries {
    pub fn new(
        posts: PostRepository,
        profiles: ProfileRepository,
        votes: VoteService,
        comments: CommentService,
    ) -> Self {
        Self {
            posts,
            profiles,
            votes,
            comments,
        }
    }

    pub async fn feed(&self, viewer_id: Option<Uuid>) -> Result<Vec<PostCard>, AppError> {
        let rows = self
            .posts
            .list_recent(FEED_PAGE_SIZE)
            .await
            .map_err(db_error("posts.feed", "피드를 불러오지 못했습니다."))?;

        self.to_cards(rows, viewer_id).await
    }

    pub async fn detail(&self, viewer_id: Option<Uuid>, post_id: Uuid) -> Result<PostDetail, AppError> {
        let row = self
            .posts
            .find_live(post_id)
            .await
            .map_err(db_error("posts.find", "게시글을 불러오지 못했습니다."))?
            .ok_or_else(|| AppError::NotFound("게시글을 찾을 수 없습니다.".to_string()))?;

        let post = self
            .to_cards(vec![row], viewer_id)
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("게시글을 불러오지 못했습니다.".to_string()))?;
        let comments = self.comments.list_for_post(post_id).await?;

        Ok(PostDetail { post, comments })
    }

    async fn to_cards(
        &self,
        rows: Vec<post::Model>,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<PostCard>, AppError> {
        let post_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut author_ids: Vec<Uuid> = rows.iter().map(|row| row.user_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let summaries = self.votes.summaries_for(&post_ids, viewer_id).await?;
        let nicknames: HashMap<Uuid, String> = self
            .profiles
            .nicknames(&author_ids)
            .await
            .map_err(db_error("profiles.list", "작성자 정보를 불러오지 못했습니다."))?;

        Ok(rows
            .into_iter()
            .map(|row| PostCard {
                id: row.id,
                caption: row.caption,
                image_url: row.image_url,
                author_label: nicknames.get(&row.user_id).cloned(),
                votes: vote_summary_for(&summaries, row.id),
                created_at: row.created_at,
            })
            .collect())
    }
}
