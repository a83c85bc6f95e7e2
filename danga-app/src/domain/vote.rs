use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub post_id: uuid::Uuid,
    pub voter_id: uuid::Uuid,
}

impl Vote {
    pub fn new(post_id: uuid::Uuid, voter_id: uuid::Uuid) -> Self {
        Self { post_id, voter_id }
    }
}

/// Like count of a post and whether the current viewer is among the likers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSummary {
    pub count: u32,
    pub liked_by_me: bool,
}

impl VoteSummary {
    pub fn new(count: u32, liked_by_me: bool) -> Self {
        Self { count, liked_by_me }
    }
}

pub fn build_vote_summary_map(
    votes: &[Vote],
    viewer_id: Option<uuid::Uuid>,
) -> HashMap<uuid::Uuid, VoteSummary> {
    let mut summaries: HashMap<uuid::Uuid, VoteSummary> = HashMap::new();

    for vote in votes {
        let summary = summaries.entry(vote.post_id).or_default();
        summary.count += 1;
        summary.liked_by_me |= viewer_id == Some(vote.voter_id);
    }

    summaries
}

pub fn vote_summary_for(
    summaries: &HashMap<uuid::Uuid, VoteSummary>,
    post_id: uuid::Uuid,
) -> VoteSummary {
    summaries.get(&post_id).copied().unwrap_or_default()
}
