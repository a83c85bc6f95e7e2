use super::gateway::{SignInPrompt, StateCell, VoteGateway};
use crate::domain::VoteSummary;
use danga_errors::AppError;
use uuid::Uuid;

pub const VOTE_SIGN_IN_MESSAGE: &str = "좋아요는 로그인 후 사용할 수 있습니다.";
const VOTE_FAILED_MESSAGE: &str = "좋아요 처리에 실패했습니다. 잠시 후 다시 시도해주세요.";
const VOTE_NETWORK_MESSAGE: &str = "네트워크 문제로 좋아요 처리에 실패했습니다.";

/// Client-side state of one post's like button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteState {
    pub count: u32,
    pub liked_by_me: bool,
    pub is_pending: bool,
    pub message: Option<String>,
    is_logged_in: bool,
}

/// What `begin_toggle` decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleStart {
    /// A toggle is already in flight; nothing changed.
    Busy,
    SignInRequired(String),
    Dispatch(PendingVote),
}

/// An optimistic toggle waiting for the server. Carries the baseline to
/// restore on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVote {
    next_liked: bool,
    previous: VoteSummary,
}

impl PendingVote {
    /// True when the request should create a vote, false when it should delete one.
    pub fn is_like(&self) -> bool {
        self.next_liked
    }
}

impl VoteState {
    pub fn new(initial_count: u32, initial_liked_by_me: bool, is_logged_in: bool) -> Self {
        Self {
            count: initial_count,
            liked_by_me: initial_liked_by_me,
            is_pending: false,
            message: None,
            is_logged_in,
        }
    }

    pub fn summary(&self) -> VoteSummary {
        VoteSummary::new(self.count, self.liked_by_me)
    }

    pub fn begin_toggle(&mut self) -> ToggleStart {
        if self.is_pending {
            return ToggleStart::Busy;
        }

        if !self.is_logged_in {
            self.message = Some(VOTE_SIGN_IN_MESSAGE.to_string());
            return ToggleStart::SignInRequired(VOTE_SIGN_IN_MESSAGE.to_string());
        }

        self.message = None;

        let previous = self.summary();
        let next_liked = !previous.liked_by_me;
        // Unliking from zero stays at zero.
        let next_count = if next_liked {
            previous.count.saturating_add(1)
        } else {
            previous.count.saturating_sub(1)
        };

        self.liked_by_me = next_liked;
        self.count = next_count;
        self.is_pending = true;

        ToggleStart::Dispatch(PendingVote {
            next_liked,
            previous,
        })
    }

    /// Reconciles the optimistic state with the server's answer.
    ///
    /// Returns the message to hand to the sign-in prompt when the server
    /// reported that the session is gone.
    pub fn finish_toggle(
        &mut self,
        pending: PendingVote,
        outcome: Result<VoteSummary, AppError>,
    ) -> Option<String> {
        self.is_pending = false;

        match outcome {
            Ok(summary) => {
                self.count = summary.count;
                self.liked_by_me = summary.liked_by_me;
                None
            }
            Err(err) => {
                self.count = pending.previous.count;
                self.liked_by_me = pending.previous.liked_by_me;

                let message = failure_message(&err, VOTE_FAILED_MESSAGE, VOTE_NETWORK_MESSAGE);
                self.message = Some(message.clone());

                err.is_unauthorized().then_some(message)
            }
        }
    }
}

/// Picks what to show for a failed action: a fixed text for transport
/// failures, otherwise the server's message or the action's fallback.
pub(crate) fn failure_message(err: &AppError, fallback: &str, network: &str) -> String {
    if err.is_transport() {
        return network.to_string();
    }

    let server_message = err.message().trim();
    if server_message.is_empty() {
        fallback.to_string()
    } else {
        server_message.to_string()
    }
}

/// Like button for a single post.
pub struct VoteController<G, P, C> {
    post_id: Uuid,
    gateway: G,
    prompt: P,
    state: C,
}

impl<G, P, C> VoteController<G, P, C>
where
    G: VoteGateway,
    P: SignInPrompt,
    C: StateCell<VoteState>,
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

    pub async fn toggle(&self) {
        let Some(start) = self.state.update_with(VoteState::begin_toggle) else {
            return;
        };

        let pending = match start {
            ToggleStart::Busy => return,
            ToggleStart::SignInRequired(message) => {
                self.prompt.request_sign_in(&message);
                return;
            }
            ToggleStart::Dispatch(pending) => pending,
        };

        let outcome = if pending.is_like() {
            self.gateway.create_vote(self.post_id).await
        } else {
            self.gateway.delete_vote(self.post_id).await
        };

        let sign_in = self
            .state
            .update_with(|state| state.finish_toggle(pending, outcome))
            .flatten();

        if let Some(message) = sign_in {
            self.prompt.request_sign_in(&message);
        }
    }
}
