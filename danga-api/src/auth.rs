//! Google sign-in: `/auth/login` starts the flow, `/auth/callback` finishes
//! it and stores the profile id in the session.

use axum::response::Redirect;
use danga_app::infrastructure::auth::{
    safe_next_path, state_matches, with_auth_message, GoogleOAuth,
};
use danga_app::infrastructure::db::db_error;
use danga_app::AppContext;
use danga_errors::AppError;
use danga_ui::api::USER_ID_KEY;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

const CSRF_KEY: &str = "oauth_csrf";
const PKCE_KEY: &str = "oauth_pkce";
const NEXT_KEY: &str = "oauth_next";

const CANCELLED: &str = "로그인이 취소되었거나 인증 과정에서 오류가 발생했습니다.";
const EXPIRED: &str = "로그인 요청이 만료되었습니다. 다시 시도해주세요.";
const SESSION_FAILED: &str = "로그인 세션을 생성하지 못했습니다. 잠시 후 다시 시도해주세요.";
const UNAVAILABLE: &str = "지금은 로그인할 수 없습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    tracing::error!("Failed to write session: {}", e);
    AppError::Internal(SESSION_FAILED.to_string())
}

async fn take(session: &Session, key: &str) -> Option<String> {
    match session.remove::<String>(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, "Failed to read session: {}", e);
            None
        }
    }
}

pub async fn login(ctx: AppContext, session: Session, query: LoginQuery) -> Redirect {
    let next = safe_next_path(query.next.as_deref());

    let Some(oauth) = ctx.oauth.as_ref() else {
        return Redirect::to(&with_auth_message(&next, UNAVAILABLE));
    };

    let request = oauth.authorize();
    let stored = async {
        session.insert(CSRF_KEY, &request.csrf_state).await?;
        session.insert(PKCE_KEY, &request.pkce_verifier).await?;
        session.insert(NEXT_KEY, &next).await
    }
    .await;

    match stored {
        Ok(()) => Redirect::to(&request.url),
        Err(e) => Redirect::to(&with_auth_message(&next, session_error(e).message())),
    }
}

pub async fn callback(ctx: AppContext, session: Session, query: CallbackQuery) -> Redirect {
    let next = safe_next_path(take(&session, NEXT_KEY).await.as_deref());
    let expected_state = take(&session, CSRF_KEY).await;
    let verifier = take(&session, PKCE_KEY).await;

    if let Some(error) = query.error.as_deref() {
        tracing::info!(error, "Sign-in rejected by provider");
        let message = query
            .error_description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .unwrap_or(CANCELLED);
        return Redirect::to(&with_auth_message(&next, message));
    }

    if !state_matches(expected_state.as_deref(), query.state.as_deref()) {
        tracing::warn!("Sign-in callback with missing or mismatched state");
        return Redirect::to(&with_auth_message(&next, EXPIRED));
    }

    let (Some(code), Some(verifier)) = (query.code, verifier) else {
        return Redirect::to(&with_auth_message(&next, EXPIRED));
    };

    let Some(oauth) = ctx.oauth.as_ref() else {
        return Redirect::to(&with_auth_message(&next, UNAVAILABLE));
    };

    match sign_in(&ctx, oauth, &session, &code, verifier).await {
        Ok(user_id) => {
            tracing::info!(%user_id, "Signed in");
            Redirect::to(&next)
        }
        Err(e) => {
            tracing::error!("Sign-in failed: {}", e);
            Redirect::to(&with_auth_message(&next, SESSION_FAILED))
        }
    }
}

async fn sign_in(
    ctx: &AppContext,
    oauth: &GoogleOAuth,
    session: &Session,
    code: &str,
    verifier: String,
) -> Result<Uuid, AppError> {
    let account = oauth.exchange_code(code, verifier).await?;

    let profile = ctx
        .profiles
        .upsert_google(&account.sub, account.nickname())
        .await
        .map_err(db_error("profiles.upsert", SESSION_FAILED))?;

    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(USER_ID_KEY, profile.id)
        .await
        .map_err(session_error)?;

    Ok(profile.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_take_removes_the_value() {
        let session = session();
        session.insert(CSRF_KEY, "state-1").await.unwrap();

        assert_eq!(take(&session, CSRF_KEY).await.as_deref(), Some("state-1"));
        assert_eq!(take(&session, CSRF_KEY).await, None);
    }

    #[tokio::test]
    async fn test_replayed_callback_finds_no_state() {
        let session = session();
        session.insert(CSRF_KEY, "state-1").await.unwrap();

        let first = take(&session, CSRF_KEY).await;
        let replay = take(&session, CSRF_KEY).await;
        assert!(state_matches(first.as_deref(), Some("state-1")));
        assert!(!state_matches(replay.as_deref(), Some("state-1")));
    }
}
