use danga_errors::AppError;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;
use std::borrow::Cow;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Stable Google account id.
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl GoogleUserInfo {
    /// Display name for a new profile, falling back to the email's local part.
    pub fn nickname(&self) -> Option<String> {
        let from_email = || {
            self.email
                .as_deref()
                .and_then(|email| email.split('@').next())
        };

        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(from_email)
            .map(str::to_string)
    }
}

/// Where to send the browser plus the secrets the callback must check.
#[derive(Debug)]
pub struct AuthorizationRequest {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

#[derive(Clone)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    http_client: oauth2::reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Result<Self, AppError> {
        let config_error = |e: oauth2::url::ParseError| {
            AppError::Internal(format!("invalid OAuth endpoint: {}", e))
        };

        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(config_error)?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(config_error)?;
        let redirect = RedirectUrl::new(redirect_uri.to_string()).map_err(config_error)?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        // Token endpoints must not be followed through redirects.
        let http_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            redirect_uri: redirect,
            http_client,
        })
    }

    /// Reads `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and
    /// `GOOGLE_REDIRECT_URI`. Returns `None` when sign-in is not configured.
    pub fn from_env() -> Result<Option<Self>, AppError> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        match (
            var("GOOGLE_CLIENT_ID"),
            var("GOOGLE_CLIENT_SECRET"),
            var("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(id), Some(secret), Some(redirect)) => {
                Self::new(&id, &secret, &redirect).map(Some)
            }
            _ => {
                tracing::warn!("Google OAuth is not configured; sign-in is disabled");
                Ok(None)
            }
        }
    }

    pub fn authorize(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (url, csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(Cow::Borrowed(&self.redirect_uri))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: url.to_string(),
            csrf_state: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    /// Trades the callback's code for tokens and fetches the account.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: String,
    ) -> Result<GoogleUserInfo, AppError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(Cow::Borrowed(&self.redirect_uri))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AppError::Internal(format!("token exchange failed: {:?}", e)))?;

        self.http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("failed to fetch user info: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Internal(format!("user info rejected: {}", e)))?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::Internal(format!("failed to parse user info: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth() -> GoogleOAuth {
        GoogleOAuth::new("client-id", "secret", "http://localhost:3000/auth/callback").unwrap()
    }

    #[test]
    fn test_authorize_url_carries_state_and_pkce() {
        let request = oauth().authorize();

        assert!(request.url.starts_with(GOOGLE_AUTH_URL));
        assert!(request.url.contains("code_challenge_method=S256"));
        assert!(request.url.contains(&format!("state={}", request.csrf_state)));
        assert!(request.url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"));
        assert!(!request.pkce_verifier.is_empty());
    }

    #[test]
    fn test_each_authorization_gets_fresh_secrets() {
        let oauth = oauth();
        let (a, b) = (oauth.authorize(), oauth.authorize());
        assert_ne!(a.csrf_state, b.csrf_state);
        assert_ne!(a.pkce_verifier, b.pkce_verifier);
    }

    #[test]
    fn test_bad_redirect_uri_is_rejected() {
        assert!(matches!(
            GoogleOAuth::new("id", "secret", "not a url"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_nickname_prefers_name_then_email() {
        let mut info = GoogleUserInfo {
            sub: "1".to_string(),
            email: Some("minji@example.com".to_string()),
            name: Some("  ".to_string()),
        };
        assert_eq!(info.nickname().as_deref(), Some("minji"));

        info.name = Some("김민지".to_string());
        assert_eq!(info.nickname().as_deref(), Some("김민지"));

        info.name = None;
        info.email = None;
        assert_eq!(info.nickname(), None);
    }
}
