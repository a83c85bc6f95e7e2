use super::comment_board::Notice;
use super::gateway::{ReportGateway, SignInPrompt, StateCell};
use super::vote_toggle::failure_message;
use crate::domain::{validate_report_reason, ReportTarget};
use danga_errors::AppError;
use uuid::Uuid;

pub const REPORT_SIGN_IN_MESSAGE: &str = "신고 기능은 로그인 후 사용할 수 있습니다.";
const REPORT_RECEIVED: &str = "신고가 접수되었습니다. 검토 후 조치하겠습니다.";
const REPORT_FAILED: &str = "신고 접수에 실패했습니다. 잠시 후 다시 시도해주세요.";
const REPORT_NETWORK_FAILED: &str = "네트워크 오류로 신고 접수에 실패했습니다.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStart {
    Busy,
    SignInRequired(String),
    Invalid,
    Dispatch(PendingReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReport {
    pub reason: String,
}

/// Client-side state of the report form attached to one post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormState {
    is_logged_in: bool,
    is_open: bool,
    is_submitting: bool,
    reason: String,
    notice: Option<Notice>,
}

impl ReportFormState {
    pub fn new(is_logged_in: bool) -> Self {
        Self {
            is_logged_in,
            is_open: false,
            is_submitting: false,
            reason: String::new(),
            notice: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn set_reason(&mut self, reason: String) {
        self.reason = reason;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Opens an empty form. Ignored while a report is in flight.
    pub fn open(&mut self) {
        if self.is_submitting {
            return;
        }
        self.is_open = true;
        self.reason.clear();
        self.notice = None;
    }

    /// Closes the form and drops the draft. Ignored while a report is in flight.
    pub fn close(&mut self) {
        if self.is_submitting {
            return;
        }
        self.is_open = false;
        self.reason.clear();
        self.notice = None;
    }

    pub fn begin_submit(&mut self) -> ReportStart {
        if self.is_submitting {
            return ReportStart::Busy;
        }

        if !self.is_logged_in {
            self.notice = Some(Notice::error(REPORT_SIGN_IN_MESSAGE));
            return ReportStart::SignInRequired(REPORT_SIGN_IN_MESSAGE.to_string());
        }

        let reason = match validate_report_reason(&self.reason) {
            Ok(reason) => reason,
            Err(err) => {
                self.notice = Some(Notice::error(err.message()));
                return ReportStart::Invalid;
            }
        };

        self.is_submitting = true;
        self.notice = None;
        ReportStart::Dispatch(PendingReport { reason })
    }

    /// On success the form closes and the notice stays as confirmation.
    pub fn finish_submit(&mut self, outcome: Result<(), AppError>) -> Option<String> {
        self.is_submitting = false;

        match outcome {
            Ok(()) => {
                self.is_open = false;
                self.reason.clear();
                self.notice = Some(Notice::success(REPORT_RECEIVED));
                None
            }
            Err(err) => {
                let message = failure_message(&err, REPORT_FAILED, REPORT_NETWORK_FAILED);
                self.notice = Some(Notice::error(message.clone()));
                err.is_unauthorized().then_some(message)
            }
        }
    }
}

/// Report button for a single post or comment.
pub struct ReportController<G, P, C> {
    target: ReportTarget,
    target_id: Uuid,
    gateway: G,
    prompt: P,
    state: C,
}

impl<G, P, C> ReportController<G, P, C>
where
    G: ReportGateway,
    P: SignInPrompt,
    C: StateCell<ReportFormState>,
{
    pub fn new(target: ReportTarget, target_id: Uuid, gateway: G, prompt: P, state: C) -> Self {
        Self {
            target,
            target_id,
            gateway,
            prompt,
            state,
        }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub async fn submit(&self) {
        let Some(start) = self.state.update_with(|state| state.begin_submit()) else {
            return;
        };

        let pending = match start {
            ReportStart::Busy | ReportStart::Invalid => return,
            ReportStart::SignInRequired(message) => {
                self.prompt.request_sign_in(&message);
                return;
            }
            ReportStart::Dispatch(pending) => pending,
        };

        let outcome = self
            .gateway
            .create_report(self.target, self.target_id, pending.reason)
            .await;

        let sign_in = self
            .state
            .update_with(|state| state.finish_submit(outcome))
            .flatten();

        if let Some(message) = sign_in {
            self.prompt.request_sign_in(&message);
        }
    }
}
