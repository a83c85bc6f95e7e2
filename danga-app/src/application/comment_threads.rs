use crate::domain::{Comment, SortOrder, Thread};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Groups a flat comment list into top-level threads.
///
/// Parents are ordered by `created_at` in the requested direction, replies
/// always oldest first. Equal timestamps keep their order in `comments`.
/// Replies whose parent is missing, deleted, or itself a reply are dropped.
pub fn build_threads(comments: &[Comment], sort_order: SortOrder) -> Vec<Thread> {
    let mut parents: Vec<&Comment> = comments
        .iter()
        .filter(|comment| comment.is_top_level() && !comment.is_deleted())
        .collect();
    let parent_ids: HashSet<Uuid> = parents.iter().map(|comment| comment.id).collect();

    let mut replies_by_parent: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for comment in comments.iter().filter(|comment| !comment.is_deleted()) {
        let Some(parent_id) = comment.parent_id else {
            continue;
        };
        if parent_ids.contains(&parent_id) {
            replies_by_parent
                .entry(parent_id)
                .or_default()
                .push(comment.clone());
        }
    }

    match sort_order {
        SortOrder::Oldest => parents.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Latest => parents.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    parents
        .into_iter()
        .map(|parent| {
            let mut replies = replies_by_parent.remove(&parent.id).unwrap_or_default();
            replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Thread {
                parent: parent.clone(),
                replies,
            }
        })
        .collect()
}

/// Number of comments shown across all threads.
pub fn visible_count(threads: &[Thread]) -> usize {
    threads.iter().map(|thread| 1 + thread.replies.len()).sum()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::Comment;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    pub fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap()
    }

    pub fn top_level(post_id: Uuid, minute: u32) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id: Uuid::new_v4(),
            body: format!("comment at {}", minute),
            parent_id: None,
            depth: 0,
            reply_to_user_id: None,
            created_at: at(minute),
            deleted_at: None,
            author_label: Some("minji".to_string()),
        }
    }

    pub fn reply_to(parent: &Comment, minute: u32) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id: parent.post_id,
            user_id: Uuid::new_v4(),
            body: format!("reply at {}", minute),
            parent_id: Some(parent.id),
            depth: parent.depth + 1,
            reply_to_user_id: Some(parent.user_id),
            created_at: at(minute),
            deleted_at: None,
            author_label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{at, reply_to, top_level};
    use super::*;

    fn ids(threads: &[Thread]) -> Vec<(Uuid, Vec<Uuid>)> {
        threads
            .iter()
            .map(|t| (t.parent.id, t.replies.iter().map(|r| r.id).collect()))
            .collect()
    }

    #[test]
    fn test_simple_thread_oldest_first() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let b = reply_to(&a, 2);
        let c = top_level(post, 3);

        let threads = build_threads(&[a.clone(), b.clone(), c.clone()], SortOrder::Oldest);

        assert_eq!(ids(&threads), vec![(a.id, vec![b.id]), (c.id, vec![])]);
        assert_eq!(visible_count(&threads), 3);
    }

    #[test]
    fn test_latest_reverses_parents_but_not_replies() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let c = top_level(post, 5);
        let late_reply = reply_to(&a, 9);
        let early_reply = reply_to(&a, 2);

        let comments = vec![late_reply.clone(), c.clone(), a.clone(), early_reply.clone()];
        let threads = build_threads(&comments, SortOrder::Latest);

        assert_eq!(
            ids(&threads),
            vec![(c.id, vec![]), (a.id, vec![early_reply.id, late_reply.id])]
        );
    }

    #[test]
    fn test_equal_timestamps_keep_collection_order() {
        let post = Uuid::new_v4();
        let first = top_level(post, 4);
        let second = top_level(post, 4);
        let comments = vec![first.clone(), second.clone()];

        let oldest = build_threads(&comments, SortOrder::Oldest);
        let latest = build_threads(&comments, SortOrder::Latest);

        assert_eq!(oldest[0].parent.id, first.id);
        assert_eq!(latest[0].parent.id, first.id);
    }

    #[test]
    fn test_orphans_and_nested_replies_are_dropped() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let reply = reply_to(&a, 2);
        let nested = reply_to(&reply, 3);
        let mut orphan = top_level(post, 4);
        orphan.parent_id = Some(Uuid::new_v4());
        orphan.depth = 1;

        let threads = build_threads(&[a.clone(), reply.clone(), nested, orphan], SortOrder::Oldest);

        assert_eq!(ids(&threads), vec![(a.id, vec![reply.id])]);
        assert_eq!(visible_count(&threads), 2);
    }

    #[test]
    fn test_deleted_comments_are_hidden() {
        let post = Uuid::new_v4();
        let mut gone = top_level(post, 1);
        let reply_of_gone = reply_to(&gone, 2);
        gone.deleted_at = Some(at(3));
        let kept = top_level(post, 4);
        let mut deleted_reply = reply_to(&kept, 5);
        deleted_reply.deleted_at = Some(at(6));

        let threads = build_threads(&[gone, reply_of_gone, kept.clone(), deleted_reply], SortOrder::Oldest);

        assert_eq!(ids(&threads), vec![(kept.id, vec![])]);
    }

    #[test]
    fn test_partition_covers_every_valid_comment_once() {
        let post = Uuid::new_v4();
        let parents: Vec<Comment> = (0..5).map(|m| top_level(post, 10 - m)).collect();
        let mut comments = parents.clone();
        for (i, parent) in parents.iter().enumerate() {
            for m in 0..i as u32 {
                comments.push(reply_to(parent, 30 + (7 * m) % 11));
            }
        }

        for order in [SortOrder::Oldest, SortOrder::Latest] {
            let threads = build_threads(&comments, order);
            assert_eq!(visible_count(&threads), comments.len());

            let mut seen: Vec<Uuid> = threads
                .iter()
                .flat_map(|t| std::iter::once(t.parent.id).chain(t.replies.iter().map(|r| r.id)))
                .collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), comments.len());

            for thread in &threads {
                assert!(thread
                    .replies
                    .windows(2)
                    .all(|w| w[0].created_at <= w[1].created_at));
            }
            let parent_times: Vec<_> = threads.iter().map(|t| t.parent.created_at).collect();
            match order {
                SortOrder::Oldest => assert!(parent_times.windows(2).all(|w| w[0] <= w[1])),
                SortOrder::Latest => assert!(parent_times.windows(2).all(|w| w[0] >= w[1])),
            }
        }
    }

    #[test]
    fn test_empty_collection() {
        assert!(build_threads(&[], SortOrder::Latest).is_empty());
    }
}
