use super::comment_threads::{build_threads, visible_count};
use super::gateway::{CommentGateway, SignInPrompt, StateCell};
use super::vote_toggle::failure_message;
use crate::domain::{reply_prefill, validate_comment_body, Comment, SortOrder, Thread};
use danga_errors::AppError;
use std::collections::HashSet;
use uuid::Uuid;

pub const COMMENT_SIGN_IN_MESSAGE: &str = "댓글 작성은 로그인 후 사용할 수 있습니다.";
pub const DELETE_SIGN_IN_MESSAGE: &str = "댓글 삭제는 로그인 후 사용할 수 있습니다.";

const COMMENT_CREATED: &str = "댓글이 등록되었습니다.";
const REPLY_CREATED: &str = "답글이 등록되었습니다.";
const COMMENT_DELETED: &str = "댓글이 삭제되었습니다.";
const CREATE_FAILED: &str = "댓글 저장에 실패했습니다. 잠시 후 다시 시도해주세요.";
const CREATE_NETWORK_FAILED: &str = "네트워크 오류로 댓글 저장에 실패했습니다.";
const DELETE_FAILED: &str = "댓글 삭제에 실패했습니다. 잠시 후 다시 시도해주세요.";
const DELETE_NETWORK_FAILED: &str = "네트워크 오류로 댓글 삭제에 실패했습니다.";

/// Outcome text of the most recent comment or report action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub(crate) fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Another submission is in flight; nothing changed.
    Busy,
    SignInRequired(String),
    /// The body failed local validation; the notice says why.
    Invalid,
    Dispatch(PendingComment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    pub body: String,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveStart {
    Busy,
    SignInRequired(String),
    Dispatch(PendingRemoval),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRemoval {
    pub comment_id: Uuid,
}

/// Client-side state of a post's comment section.
///
/// At most one create request is outstanding at a time, whether top-level or
/// reply. Deletions are tracked per comment id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBoardState {
    comments: Vec<Comment>,
    sort_order: SortOrder,
    is_logged_in: bool,
    viewer_label: Option<String>,
    draft: String,
    active_reply_parent_id: Option<Uuid>,
    reply_draft: String,
    is_submitting_top_level: bool,
    reply_submitting_parent_id: Option<Uuid>,
    deleting: HashSet<Uuid>,
    notice: Option<Notice>,
}

impl CommentBoardState {
    pub fn new(comments: Vec<Comment>, is_logged_in: bool, viewer_label: Option<String>) -> Self {
        Self {
            comments,
            sort_order: SortOrder::default(),
            is_logged_in,
            viewer_label,
            draft: String::new(),
            active_reply_parent_id: None,
            reply_draft: String::new(),
            is_submitting_top_level: false,
            reply_submitting_parent_id: None,
            deleting: HashSet::new(),
            notice: None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn threads(&self) -> Vec<Thread> {
        build_threads(&self.comments, self.sort_order)
    }

    pub fn visible_count(&self) -> usize {
        visible_count(&self.threads())
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Ignored while a submission is pending.
    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        if !self.has_pending_submission() {
            self.sort_order = sort_order;
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn reply_draft(&self) -> &str {
        &self.reply_draft
    }

    pub fn set_reply_draft(&mut self, draft: String) {
        self.reply_draft = draft;
    }

    pub fn active_reply_parent_id(&self) -> Option<Uuid> {
        self.active_reply_parent_id
    }

    pub fn is_reply_form_open(&self, parent_id: Uuid) -> bool {
        self.active_reply_parent_id == Some(parent_id)
    }

    /// Opens the reply form under `parent` with a mention prefix, or closes
    /// it and drops the draft if it is already open. Opening one form closes
    /// any other.
    pub fn toggle_reply_form(&mut self, parent: &Comment) {
        if self.has_pending_submission() {
            return;
        }

        if self.is_reply_form_open(parent.id) {
            self.active_reply_parent_id = None;
            self.reply_draft.clear();
        } else {
            self.active_reply_parent_id = Some(parent.id);
            self.reply_draft = reply_prefill(parent.author_label.as_deref());
        }
    }

    pub fn has_pending_submission(&self) -> bool {
        self.is_submitting_top_level || self.reply_submitting_parent_id.is_some()
    }

    pub fn is_submitting_top_level(&self) -> bool {
        self.is_submitting_top_level
    }

    pub fn is_reply_submitting(&self, parent_id: Uuid) -> bool {
        self.reply_submitting_parent_id == Some(parent_id)
    }

    pub fn is_deleting(&self, comment_id: Uuid) -> bool {
        self.deleting.contains(&comment_id)
    }

    /// True while the delete control for `comment_id` must stay disabled.
    pub fn is_remove_locked(&self, comment_id: Uuid) -> bool {
        self.is_deleting(comment_id) || self.has_pending_submission()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn begin_submit(&mut self, raw_body: &str, parent: Option<&Comment>) -> SubmitStart {
        if self.has_pending_submission() {
            return SubmitStart::Busy;
        }

        if !self.is_logged_in {
            self.notice = Some(Notice::error(COMMENT_SIGN_IN_MESSAGE));
            return SubmitStart::SignInRequired(COMMENT_SIGN_IN_MESSAGE.to_string());
        }

        let body = match validate_comment_body(raw_body) {
            Ok(body) => body,
            Err(err) => {
                self.notice = Some(Notice::error(err.message()));
                return SubmitStart::Invalid;
            }
        };

        self.notice = None;

        let parent_id = parent.map(|parent| parent.id);
        match parent_id {
            Some(id) => self.reply_submitting_parent_id = Some(id),
            None => self.is_submitting_top_level = true,
        }

        SubmitStart::Dispatch(PendingComment { body, parent_id })
    }

    /// Applies the server's answer to a create request. Returns the message
    /// for the sign-in prompt when the session turned out to be gone.
    pub fn finish_submit(
        &mut self,
        pending: PendingComment,
        outcome: Result<Comment, AppError>,
    ) -> Option<String> {
        match pending.parent_id {
            Some(_) => self.reply_submitting_parent_id = None,
            None => self.is_submitting_top_level = false,
        }

        match outcome {
            Ok(created) => {
                let label = created.author_label.clone().or_else(|| self.viewer_label.clone());
                self.comments.push(created.with_author_label(label));

                if pending.parent_id.is_some() {
                    self.reply_draft.clear();
                    self.active_reply_parent_id = None;
                    self.notice = Some(Notice::success(REPLY_CREATED));
                } else {
                    self.draft.clear();
                    self.notice = Some(Notice::success(COMMENT_CREATED));
                }
                None
            }
            Err(err) => {
                let message = failure_message(&err, CREATE_FAILED, CREATE_NETWORK_FAILED);
                self.notice = Some(Notice::error(message.clone()));
                err.is_unauthorized().then_some(message)
            }
        }
    }

    pub fn begin_remove(&mut self, comment_id: Uuid) -> RemoveStart {
        if self.is_remove_locked(comment_id) {
            return RemoveStart::Busy;
        }

        if !self.is_logged_in {
            self.notice = Some(Notice::error(DELETE_SIGN_IN_MESSAGE));
            return RemoveStart::SignInRequired(DELETE_SIGN_IN_MESSAGE.to_string());
        }

        self.deleting.insert(comment_id);
        self.notice = None;

        RemoveStart::Dispatch(PendingRemoval { comment_id })
    }

    pub fn finish_remove(
        &mut self,
        pending: PendingRemoval,
        outcome: Result<(), AppError>,
    ) -> Option<String> {
        self.deleting.remove(&pending.comment_id);

        match outcome {
            Ok(()) => {
                self.comments.retain(|comment| comment.id != pending.comment_id);
                if self.active_reply_parent_id == Some(pending.comment_id) {
                    self.active_reply_parent_id = None;
                    self.reply_draft.clear();
                }
                self.notice = Some(Notice::success(COMMENT_DELETED));
                None
            }
            Err(err) => {
                let message = failure_message(&err, DELETE_FAILED, DELETE_NETWORK_FAILED);
                self.notice = Some(Notice::error(message.clone()));
                err.is_unauthorized().then_some(message)
            }
        }
    }
}

/// Comment section of one post.
pub struct CommentBoard<G, P, C> {
    post_id: Uuid,
    gateway: G,
    prompt: P,
    state: C,
}

impl<G, P, C> CommentBoard<G, P, C>
where
    G: CommentGateway,
    P: SignInPrompt,
    C: StateCell<CommentBoardState>,
{
    pub fn new(post_id: Uuid, gateway: G, prompt: P, state: C) -> Self {
        Self {
            post_id,
            gateway,
            prompt,
            state,
        }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Submits `raw_body` as a top-level comment, or as a reply to `parent`.
    pub async fn submit(&self, raw_body: &str, parent: Option<&Comment>) {
        let Some(start) = self
            .state
            .update_with(|state| state.begin_submit(raw_body, parent))
        else {
            return;
        };

        let pending = match start {
            SubmitStart::Busy | SubmitStart::Invalid => return,
            SubmitStart::SignInRequired(message) => {
                self.prompt.request_sign_in(&message);
                return;
            }
            SubmitStart::Dispatch(pending) => pending,
        };

        let outcome = self
            .gateway
            .create_comment(self.post_id, pending.body.clone(), pending.parent_id)
            .await;

        let sign_in = self
            .state
            .update_with(|state| state.finish_submit(pending, outcome))
            .flatten();

        if let Some(message) = sign_in {
            self.prompt.request_sign_in(&message);
        }
    }

    /// Submits whatever is in the top-level input.
    pub async fn submit_draft(&self) {
        let Some(draft) = self.state.read_with(|state| state.draft().to_string()) else {
            return;
        };
        self.submit(&draft, None).await;
    }

    /// Submits whatever is in the reply input under `parent`.
    pub async fn submit_reply_draft(&self, parent: &Comment) {
        let Some(draft) = self.state.read_with(|state| state.reply_draft().to_string()) else {
            return;
        };
        self.submit(&draft, Some(parent)).await;
    }

    pub async fn remove(&self, comment_id: Uuid) {
        let Some(start) = self.state.update_with(|state| state.begin_remove(comment_id)) else {
            return;
        };

        let pending = match start {
            RemoveStart::Busy => return,
            RemoveStart::SignInRequired(message) => {
                self.prompt.request_sign_in(&message);
                return;
            }
            RemoveStart::Dispatch(pending) => pending,
        };

        let outcome = self.gateway.delete_comment(pending.comment_id).await;

        let sign_in = self
            .state
            .update_with(|state| state.finish_remove(pending, outcome))
            .flatten();

        if let Some(message) = sign_in {
            self.prompt.request_sign_in(&message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::comment_threads::fixtures::{at, reply_to, top_level};
    use super::*;
    use crate::domain::MAX_COMMENT_LENGTH;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create {
            post_id: Uuid,
            body: String,
            parent_id: Option<Uuid>,
        },
        Delete(Uuid),
    }

    #[derive(Default)]
    struct FakeComments {
        created: RefCell<VecDeque<Result<Comment, AppError>>>,
        deleted: RefCell<VecDeque<Result<(), AppError>>>,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeComments {
        fn creating(outcome: Result<Comment, AppError>) -> Self {
            let fake = Self::default();
            fake.created.borrow_mut().push_back(outcome);
            fake
        }

        fn deleting(outcomes: Vec<Result<(), AppError>>) -> Self {
            let fake = Self::default();
            fake.deleted.borrow_mut().extend(outcomes);
            fake
        }
    }

    #[async_trait(?Send)]
    impl CommentGateway for FakeComments {
        async fn create_comment(
            &self,
            post_id: Uuid,
            body: String,
            parent_id: Option<Uuid>,
        ) -> Result<Comment, AppError> {
            self.calls.borrow_mut().push(Call::Create {
                post_id,
                body,
                parent_id,
            });
            tokio::task::yield_now().await;
            self.created
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Internal(String::new())))
        }

        async fn delete_comment(&self, comment_id: Uuid) -> Result<(), AppError> {
            self.calls.borrow_mut().push(Call::Delete(comment_id));
            tokio::task::yield_now().await;
            self.deleted
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Internal(String::new())))
        }
    }

    fn server_copy(post_id: Uuid, body: &str, parent: Option<&Comment>) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id: Uuid::new_v4(),
            body: body.to_string(),
            parent_id: parent.map(|p| p.id),
            depth: if parent.is_some() { 1 } else { 0 },
            reply_to_user_id: parent.map(|p| p.user_id),
            created_at: at(50),
            deleted_at: None,
            author_label: None,
        }
    }

    fn board(
        post_id: Uuid,
        gateway: FakeComments,
        comments: Vec<Comment>,
        logged_in: bool,
    ) -> CommentBoard<FakeComments, impl Fn(&str), RefCell<CommentBoardState>> {
        CommentBoard::new(
            post_id,
            gateway,
            |_: &str| {},
            RefCell::new(CommentBoardState::new(comments, logged_in, Some("me".to_string()))),
        )
    }

    #[test]
    fn test_invalid_bodies_record_a_message() {
        let mut state = CommentBoardState::new(vec![], true, None);

        for body in ["   ".to_string(), "x".repeat(MAX_COMMENT_LENGTH + 1)] {
            assert_eq!(state.begin_submit(&body, None), SubmitStart::Invalid);
            let notice = state.notice().cloned().unwrap();
            assert!(notice.is_error);
            assert!(!state.has_pending_submission());
        }
    }

    #[test]
    fn test_starting_an_action_clears_previous_notice() {
        let post = Uuid::new_v4();
        let target = top_level(post, 1);
        let mut state = CommentBoardState::new(vec![target.clone()], true, None);

        assert_eq!(state.begin_submit("  ", None), SubmitStart::Invalid);
        assert!(state.notice().is_some());
        let SubmitStart::Dispatch(pending) = state.begin_submit("hi", None) else {
            panic!("expected dispatch");
        };
        assert_eq!(state.notice(), None);

        state.finish_submit(pending, Err(AppError::Internal("boom".to_string())));
        assert!(state.notice().is_some_and(|n| n.is_error));
        assert!(matches!(state.begin_remove(target.id), RemoveStart::Dispatch(_)));
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_pending_reply_blocks_top_level_and_other_replies() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let b = top_level(post, 2);
        let mut state = CommentBoardState::new(vec![a.clone(), b.clone()], true, None);

        assert!(matches!(state.begin_submit("hi", Some(&a)), SubmitStart::Dispatch(_)));
        assert!(state.is_reply_submitting(a.id));
        assert!(!state.is_reply_submitting(b.id));
        assert!(!state.is_submitting_top_level());

        assert_eq!(state.begin_submit("hello", None), SubmitStart::Busy);
        assert_eq!(state.begin_submit("hello", Some(&b)), SubmitStart::Busy);
        assert_eq!(state.begin_remove(b.id), RemoveStart::Busy);
    }

    #[test]
    fn test_delete_control_locks_during_any_submission() {
        let post = Uuid::new_v4();
        let mine = top_level(post, 1);
        let other = top_level(post, 2);
        let mut state = CommentBoardState::new(vec![mine.clone(), other.clone()], true, None);
        assert!(!state.is_remove_locked(mine.id));

        let SubmitStart::Dispatch(pending) = state.begin_submit("@minji 답글", Some(&other)) else {
            panic!("expected dispatch");
        };
        assert!(state.is_remove_locked(mine.id));
        assert!(state.is_remove_locked(other.id));

        state.finish_submit(pending, Err(AppError::Internal("boom".to_string())));
        assert!(!state.is_remove_locked(mine.id));

        assert!(matches!(state.begin_remove(mine.id), RemoveStart::Dispatch(_)));
        assert!(state.is_remove_locked(mine.id));
        assert!(!state.is_remove_locked(other.id));
    }

    #[test]
    fn test_reply_form_prefill_and_toggle() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let mut b = top_level(post, 2);
        b.author_label = None;
        let mut state = CommentBoardState::new(vec![a.clone(), b.clone()], true, None);

        state.toggle_reply_form(&a);
        assert!(state.is_reply_form_open(a.id));
        assert_eq!(state.reply_draft(), "@minji ");

        state.toggle_reply_form(&b);
        assert!(!state.is_reply_form_open(a.id));
        assert_eq!(state.active_reply_parent_id(), Some(b.id));
        assert_eq!(state.reply_draft(), "@익명 ");

        state.toggle_reply_form(&b);
        assert_eq!(state.active_reply_parent_id(), None);
        assert_eq!(state.reply_draft(), "");
    }

    #[test]
    fn test_sort_order_is_locked_while_submitting() {
        let mut state = CommentBoardState::new(vec![], true, None);
        let _ = state.begin_submit("hi", None);
        state.set_sort_order(SortOrder::Latest);
        assert_eq!(state.sort_order(), SortOrder::Oldest);
    }

    #[tokio::test]
    async fn test_top_level_submit_appends_and_clears_draft() {
        let post = Uuid::new_v4();
        let created = server_copy(post, "멋진 코디네요", None);
        let board = board(post, FakeComments::creating(Ok(created.clone())), vec![], true);
        board
            .state()
            .borrow_mut()
            .set_draft("  멋진 코디네요 ".to_string());

        board.submit_draft().await;

        assert_eq!(
            board.gateway.calls.borrow().as_slice(),
            &[Call::Create {
                post_id: post,
                body: "멋진 코디네요".to_string(),
                parent_id: None,
            }]
        );
        let state = board.state().borrow();
        assert_eq!(state.comments().len(), 1);
        assert_eq!(state.comments()[0].author_label.as_deref(), Some("me"));
        assert_eq!(state.draft(), "");
        assert!(!state.has_pending_submission());
        assert_eq!(state.notice(), Some(&Notice::success(COMMENT_CREATED)));
        assert_eq!(state.visible_count(), 1);
    }

    #[tokio::test]
    async fn test_reply_submit_closes_form() {
        let post = Uuid::new_v4();
        let parent = top_level(post, 1);
        let created = server_copy(post, "@minji 고마워요", Some(&parent));
        let board = board(
            post,
            FakeComments::creating(Ok(created.clone())),
            vec![parent.clone()],
            true,
        );
        board.state().borrow_mut().toggle_reply_form(&parent);
        board
            .state()
            .borrow_mut()
            .set_reply_draft("@minji 고마워요".to_string());

        board.submit_reply_draft(&parent).await;

        let state = board.state().borrow();
        assert_eq!(state.active_reply_parent_id(), None);
        assert_eq!(state.reply_draft(), "");
        assert!(!state.is_reply_submitting(parent.id));
        let threads = state.threads();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies[0].id, created.id);
        assert_eq!(state.notice(), Some(&Notice::success(REPLY_CREATED)));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_collection_and_draft() {
        let post = Uuid::new_v4();
        let existing = top_level(post, 1);
        let board = board(
            post,
            FakeComments::creating(Err(AppError::NotFound(
                "댓글 대상 게시글을 찾을 수 없습니다.".to_string(),
            ))),
            vec![existing.clone()],
            true,
        );
        board.state().borrow_mut().set_draft("hello".to_string());

        board.submit_draft().await;

        let state = board.state().borrow();
        assert_eq!(state.comments(), &[existing]);
        assert_eq!(state.draft(), "hello");
        assert_eq!(
            state.notice(),
            Some(&Notice::error("댓글 대상 게시글을 찾을 수 없습니다."))
        );
        assert!(!state.has_pending_submission());
    }

    #[tokio::test]
    async fn test_nested_reply_rejection_is_surfaced_once() {
        let post = Uuid::new_v4();
        let parent = top_level(post, 1);
        let reply = reply_to(&parent, 2);
        let board = board(
            post,
            FakeComments::creating(Err(AppError::Validation(
                "답글에는 답글을 달 수 없습니다.".to_string(),
            ))),
            vec![parent, reply.clone()],
            true,
        );

        board.submit("nested", Some(&reply)).await;

        assert_eq!(board.gateway.calls.borrow().len(), 1);
        let state = board.state().borrow();
        assert_eq!(state.comments().len(), 2);
        assert_eq!(
            state.notice(),
            Some(&Notice::error("답글에는 답글을 달 수 없습니다."))
        );
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let post = Uuid::new_v4();
        let board = board(
            post,
            FakeComments::creating(Err(AppError::Network("offline".to_string()))),
            vec![],
            true,
        );

        board.submit("hi", None).await;

        assert_eq!(
            board.state().borrow().notice(),
            Some(&Notice::error(CREATE_NETWORK_FAILED))
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_gateway() {
        let post = Uuid::new_v4();
        let board = board(post, FakeComments::default(), vec![], true);

        board.submit("  \n ", None).await;
        board.submit(&"가".repeat(MAX_COMMENT_LENGTH + 1), None).await;

        assert!(board.gateway.calls.borrow().is_empty());
        assert!(board.state().borrow().notice().unwrap().is_error);
    }

    #[tokio::test]
    async fn test_signed_out_submit_prompts() {
        let prompts = RefCell::new(Vec::<String>::new());
        let board = CommentBoard::new(
            Uuid::new_v4(),
            FakeComments::default(),
            |m: &str| prompts.borrow_mut().push(m.to_string()),
            RefCell::new(CommentBoardState::new(vec![], false, None)),
        );

        board.submit("hi", None).await;
        board.remove(Uuid::new_v4()).await;

        assert!(board.gateway.calls.borrow().is_empty());
        assert_eq!(
            prompts.borrow().as_slice(),
            &[
                COMMENT_SIGN_IN_MESSAGE.to_string(),
                DELETE_SIGN_IN_MESSAGE.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_submissions_send_one_request() {
        let post = Uuid::new_v4();
        let parent = top_level(post, 1);
        let board = board(
            post,
            FakeComments::creating(Ok(server_copy(post, "first", None))),
            vec![parent.clone()],
            true,
        );

        tokio::join!(board.submit("first", None), board.submit("second", Some(&parent)));

        assert_eq!(board.gateway.calls.borrow().len(), 1);
        assert_eq!(board.state().borrow().comments().len(), 2);
    }

    #[tokio::test]
    async fn test_removals_of_different_comments_overlap() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let b = top_level(post, 2);
        let c = top_level(post, 3);
        let board = board(
            post,
            FakeComments::deleting(vec![Ok(()), Ok(())]),
            vec![a.clone(), b.clone(), c.clone()],
            true,
        );

        tokio::join!(board.remove(a.id), board.remove(b.id), board.remove(a.id));

        assert_eq!(
            board.gateway.calls.borrow().as_slice(),
            &[Call::Delete(a.id), Call::Delete(b.id)]
        );
        let state = board.state().borrow();
        assert_eq!(state.comments(), &[c]);
        assert!(!state.is_deleting(a.id));
        assert!(!state.is_deleting(b.id));
        assert_eq!(state.notice(), Some(&Notice::success(COMMENT_DELETED)));
    }

    #[tokio::test]
    async fn test_rejected_removal_keeps_comment() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let board = board(
            post,
            FakeComments::deleting(vec![Err(AppError::Forbidden(
                "본인 댓글만 삭제할 수 있습니다.".to_string(),
            ))]),
            vec![a.clone()],
            true,
        );

        board.remove(a.id).await;

        let state = board.state().borrow();
        assert_eq!(state.comments(), &[a]);
        assert_eq!(
            state.notice(),
            Some(&Notice::error("본인 댓글만 삭제할 수 있습니다."))
        );
    }

    #[tokio::test]
    async fn test_lost_session_during_delete_prompts() {
        let post = Uuid::new_v4();
        let a = top_level(post, 1);
        let prompts = RefCell::new(Vec::<String>::new());
        let board = CommentBoard::new(
            post,
            FakeComments::deleting(vec![Err(AppError::Unauthorized(String::new()))]),
            |m: &str| prompts.borrow_mut().push(m.to_string()),
            RefCell::new(CommentBoardState::new(vec![a.clone()], true, None)),
        );

        board.remove(a.id).await;

        assert_eq!(prompts.borrow().as_slice(), &[DELETE_FAILED.to_string()]);
        assert_eq!(board.state().borrow().comments().len(), 1);
    }
}
