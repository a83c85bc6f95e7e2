use super::entities::{profile, Profile};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profile::Model>, DbErr> {
        Profile::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<profile::Model>, DbErr> {
        Profile::find()
            .filter(profile::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
    }

    /// Returns the profile linked to `google_id`, creating it on first
    /// sign-in. An existing nickname is never overwritten.
    pub async fn upsert_google(
        &self,
        google_id: &str,
        nickname: Option<String>,
    ) -> Result<profile::Model, DbErr> {
        if let Some(existing) = self.find_by_google_id(google_id).await? {
            return Ok(existing);
        }

        let now = chrono::Utc::now();
        let active = profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            google_id: Set(Some(google_id.to_string())),
            nickname: Set(nickname),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        active.insert(&self.db).await
    }

    /// Nicknames keyed by user id. Users without a profile or a nickname are
    /// absent from the map.
    pub async fn nicknames(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, String>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let profiles = Profile::find()
            .filter(profile::Column::Id.is_in(user_ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(profiles
            .into_iter()
            .filter_map(|p| p.nickname.map(|nickname| (p.id, nickname)))
            .collect())
    }
}
