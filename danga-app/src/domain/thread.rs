use super::Comment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Oldest,
    Latest,
}

/// A top-level comment and its direct replies, oldest reply first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub parent: Comment,
    pub replies: Vec<Comment>,
}
