//! Seams between the interaction controllers and the outside world.
//!
//! The controllers never talk to HTTP, a signal graph, or a modal directly;
//! they are handed an implementation of each trait at construction.

use crate::domain::{Comment, ReportTarget, VoteSummary};
use async_trait::async_trait;
use danga_errors::AppError;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Remote side of the like button.
#[async_trait(?Send)]
pub trait VoteGateway {
    async fn create_vote(&self, post_id: Uuid) -> Result<VoteSummary, AppError>;
    async fn delete_vote(&self, post_id: Uuid) -> Result<VoteSummary, AppError>;
}

/// Remote side of the comment section. The server derives `depth` and
/// `reply_to_user_id` from `parent_id`.
#[async_trait(?Send)]
pub trait CommentGateway {
    async fn create_comment(
        &self,
        post_id: Uuid,
        body: String,
        parent_id: Option<Uuid>,
    ) -> Result<Comment, AppError>;

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), AppError>;
}

/// Remote side of the report form.
#[async_trait(?Send)]
pub trait ReportGateway {
    async fn create_report(
        &self,
        target: ReportTarget,
        target_id: Uuid,
        reason: String,
    ) -> Result<(), AppError>;
}

/// Asks whoever owns the page to show a sign-in affordance.
pub trait SignInPrompt {
    fn request_sign_in(&self, message: &str);
}

impl<F> SignInPrompt for F
where
    F: Fn(&str),
{
    fn request_sign_in(&self, message: &str) {
        self(message)
    }
}

/// Somewhere controller state lives between suspension points.
///
/// Both methods return `None` once the storage is gone, e.g. when the
/// component owning a signal was unmounted while a request was in flight.
pub trait StateCell<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T> StateCell<T> for RefCell<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

impl<T, C> StateCell<T> for Rc<C>
where
    C: StateCell<T>,
{
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.as_ref().update_with(f)
    }

    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.as_ref().read_with(f)
    }
}
