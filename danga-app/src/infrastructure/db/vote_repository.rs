use super::entities::{vote, Vote};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the vote; an existing (post, voter) pair is left untouched.
    /// Returns whether a row was written.
    pub async fn insert_ignoring_duplicate(
        &self,
        post_id: Uuid,
        voter_id: Uuid,
    ) -> Result<bool, DbErr> {
        let active = vote::ActiveModel {
            post_id: Set(post_id),
            voter_id: Set(voter_id),
            created_at: Set(Some(chrono::Utc::now())),
        };

        let inserted = Vote::insert(active)
            .on_conflict(
                OnConflict::columns([vote::Column::PostId, vote::Column::VoterId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn delete(&self, post_id: Uuid, voter_id: Uuid) -> Result<(), DbErr> {
        Vote::delete_many()
            .filter(vote::Column::PostId.eq(post_id))
            .filter(vote::Column::VoterId.eq(voter_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> Result<u64, DbErr> {
        Vote::find()
            .filter(vote::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
    }

    pub async fn list_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<crate::domain::Vote>, DbErr> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Vote::find()
            .filter(vote::Column::PostId.is_in(post_ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| crate::domain::Vote::new(row.post_id, row.voter_id))
            .collect())
    }
}
