mod google_oauth;
mod redirect;

pub use google_oauth::{AuthorizationRequest, GoogleOAuth, GoogleUserInfo};
pub use redirect::{safe_next_path, state_matches, with_auth_message};
