#![recursion_limit = "256"]

mod auth;

use axum::{
    extract::Query,
    response::Redirect,
    routing::{get, post},
    Router,
};
use danga_app::AppContext;
use danga_errors::AppError;
use danga_ui::api::{
    CreateCommentFn, CreateReportFn, CreateVoteFn, DeleteCommentFn, DeleteVoteFn, GetFeedFn,
    GetPostDetailFn, GetViewerFn,
};
use danga_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

const DEFAULT_SESSION_INACTIVITY_DAYS: i64 = 7;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let app_context = match AppContext::from_env().await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let inactivity_days = session_inactivity_days();
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(!cfg!(debug_assertions))
        .with_expiry(Expiry::OnInactivity(time::Duration::days(inactivity_days)));

    let routes = generate_route_list(App);

    register_server_fns();

    let app = Router::new()
        .route("/auth/login", get({
            let ctx = app_context.clone();
            move |session: Session, query: Query<auth::LoginQuery>| {
                let ctx = ctx.clone();
                async move {
                    auth::login(ctx, session, query.0).await
                }
            }
        }))
        .route("/auth/callback", get({
            let ctx = app_context.clone();
            move |session: Session, query: Query<auth::CallbackQuery>| {
                let ctx = ctx.clone();
                async move {
                    auth::callback(ctx, session, query.0).await
                }
            }
        }))
        .route("/auth/logout", post(logout))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(session_layer),
        )
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Sessions expire after {} days of inactivity. Rate limit 20/min, 300/hour per user",
        inactivity_days
    );
    if app_context.oauth.is_none() {
        tracing::warn!("Sign-in disabled: set GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

fn register_server_fns() {
    server_fn::axum::register_explicit::<CreateVoteFn>();
    server_fn::axum::register_explicit::<DeleteVoteFn>();
    server_fn::axum::register_explicit::<CreateCommentFn>();
    server_fn::axum::register_explicit::<DeleteCommentFn>();
    server_fn::axum::register_explicit::<CreateReportFn>();
    server_fn::axum::register_explicit::<GetFeedFn>();
    server_fn::axum::register_explicit::<GetPostDetailFn>();
    server_fn::axum::register_explicit::<GetViewerFn>();
    tracing::info!("Registered 8 server functions");
}

fn session_inactivity_days() -> i64 {
    match std::env::var("SESSION_INACTIVITY_DAYS") {
        Ok(raw) => match raw.trim().parse::<i64>() {
            Ok(days) if days > 0 => days,
            _ => {
                tracing::warn!(
                    "Ignoring invalid SESSION_INACTIVITY_DAYS={:?}, using {}",
                    raw,
                    DEFAULT_SESSION_INACTIVITY_DAYS
                );
                DEFAULT_SESSION_INACTIVITY_DAYS
            }
        },
        Err(_) => DEFAULT_SESSION_INACTIVITY_DAYS,
    }
}

async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await.map_err(|e| {
        tracing::error!("Failed to clear session: {}", e);
        AppError::Internal("로그아웃에 실패했습니다.".to_string())
    })?;

    Ok(Redirect::to("/"))
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::MetaTags;

    view! {
        <!DOCTYPE html>
        <html lang="ko">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>👗</text></svg>"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
