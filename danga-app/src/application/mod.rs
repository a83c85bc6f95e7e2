mod comment_board;
mod comment_threads;
mod gateway;
mod report_form;
mod vote_toggle;

#[cfg(feature = "ssr")]
mod comment_service;
#[cfg(feature = "ssr")]
mod post_queries;
#[cfg(feature = "ssr")]
mod report_service;
#[cfg(feature = "ssr")]
mod vote_service;

pub use comment_board::{
    CommentBoard, CommentBoardState, Notice, PendingComment, PendingRemoval, RemoveStart,
    SubmitStart, COMMENT_SIGN_IN_MESSAGE, DELETE_SIGN_IN_MESSAGE,
};
pub use comment_threads::{build_threads, visible_count};
pub use gateway::{CommentGateway, ReportGateway, SignInPrompt, StateCell, VoteGateway};
pub use report_form::{
    PendingReport, ReportController, ReportFormState, ReportStart, REPORT_SIGN_IN_MESSAGE,
};
pub use vote_toggle::{PendingVote, ToggleStart, VoteController, VoteState, VOTE_SIGN_IN_MESSAGE};

#[cfg(feature = "ssr")]
pub use comment_service::{deletion_check, reply_placement, CommentService, ReplyPlacement};
#[cfg(feature = "ssr")]
pub use post_queries::PostQueries;
#[cfg(feature = "ssr")]
pub use report_service::ReportService;
#[cfg(feature = "ssr")]
pub use vote_service::VoteService;
