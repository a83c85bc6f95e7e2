use crate::domain::{build_vote_summary_map, VoteSummary};
use crate::infrastructure::db::{db_error, PostRepository, VoteRepository};
use danga_errors::AppError;
use std::collections::HashMap;
use uuid::Uuid;

/// Server side of the like button. Every write answers with the recounted
/// total so clients can reconcile against it.
#[derive(Clone)]
pub struct VoteService {
    votes: VoteRepository,
    posts: PostRepository,
}

impl VoteService {
    pub fn new(votes: VoteRepository, posts: PostRepository) -> Self {
        Self { votes, posts }
    }

    pub async fn like(&self, voter_id: Uuid, post_id: Uuid) -> Result<VoteSummary, AppError> {
        self.ensure_live_post(post_id).await?;

        let inserted = self
            .votes
            .insert_ignoring_duplicate(post_id, voter_id)
            .await
            .map_err(db_error("votes.insert", "좋아요 저장에 실패했습니다."))?;

        if !inserted {
            tracing::debug!(%post_id, %voter_id, "vote already present");
        }

        let count = self.count(post_id).await?;
        Ok(VoteSummary::new(count, true))
    }

    pub async fn unlike(&self, voter_id: Uuid, post_id: Uuid) -> Result<VoteSummary, AppError> {
        self.votes
            .delete(post_id, voter_id)
            .await
            .map_err(db_error("votes.delete", "좋아요 취소에 실패했습니다."))?;

        let count = self.count(post_id).await?;
        Ok(VoteSummary::new(count, false))
    }

    /// Summaries for a page of posts, fetched in one query.
    pub async fn summaries_for(
        &self,
        post_ids: &[Uuid],
        viewer_id: Option<Uuid>,
    ) -> Result<HashMap<Uuid, VoteSummary>, AppError> {
        let votes = self
            .votes
            .list_for_posts(post_ids)
            .await
            .map_err(db_error("votes.fetch", "좋아요 정보를 불러오지 못했습니다."))?;

        Ok(build_vote_summary_map(&votes, viewer_id))
    }

    async fn ensure_live_post(&self, post_id: Uuid) -> Result<(), AppError> {
        self.posts
            .find_live(post_id)
            .await
            .map_err(db_error("posts.find", "게시글을 확인하지 못했습니다."))?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("게시글을 찾을 수 없습니다.".to_string()))
    }

    async fn count(&self, post_id: Uuid) -> Result<u32, AppError> {
        let count = self
            .votes
            .count_for_post(post_id)
            .await
            .map_err(db_error("votes.count", "좋아요 수를 확인하지 못했습니다."))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}
