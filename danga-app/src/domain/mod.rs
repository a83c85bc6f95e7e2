mod comment;
mod post;
mod report;
mod thread;
mod vote;

pub use comment::{reply_prefill, validate_comment_body, Comment, ANONYMOUS_LABEL, MAX_COMMENT_LENGTH};
pub use post::{PostCard, PostDetail, Viewer};
pub use report::{
    validate_report_reason, ReportTarget, MAX_REPORT_REASON_LENGTH, MIN_REPORT_REASON_LENGTH,
};
pub use thread::{SortOrder, Thread};
pub use vote::{build_vote_summary_map, vote_summary_for, Vote, VoteSummary};
