mod comment_section;
mod error_display;
mod loading_spinner;
mod login_prompt;
mod report_button;
mod vote_button;

pub use comment_section::CommentSection;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use login_prompt::{use_sign_in_prompt, LoginPrompt};
pub use report_button::ReportButton;
pub use vote_button::VoteButton;
