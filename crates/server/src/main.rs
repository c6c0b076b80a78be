// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use cleaning_bot::Conversation;
use cleaning_bot_api::{ChatUpdate, UpdateOutcome, WebhookResponse, handle_update};
use cleaning_bot_persistence::Persistence;

use crate::session::VerifiedWebhook;

/// Cleaning Bot Server - webhook backend for the cleaning inspection bot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database location: a `SQLite` file path or a `mysql://` URL. If not
    /// provided, uses an in-memory database.
    #[arg(short, long, env = "DB_URL")]
    database_url: Option<String>,

    /// Bot token, also expected as the webhook secret header.
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// Lock order is persistence first, then conversations.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for every store.
    persistence: Arc<Mutex<Persistence>>,
    /// Conversation state per chat user. Idle users have no entry.
    conversations: Arc<Mutex<HashMap<i64, Conversation>>>,
    /// The expected webhook secret.
    secret: Arc<str>,
}

impl AppState {
    fn new(persistence: Persistence, secret: &str) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            conversations: Arc::new(Mutex::new(HashMap::new())),
            secret: Arc::from(secret),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected malformed webhook body");
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Handler for POST `/webhook`.
///
/// Application failures are replies inside the response. Only transport
/// problems become HTTP errors.
async fn handle_webhook(
    AxumState(app_state): AxumState<AppState>,
    _secret: VerifiedWebhook,
    body: Result<Json<ChatUpdate>, JsonRejection>,
) -> Result<Json<WebhookResponse>, HttpError> {
    let Json(update) = body?;
    let user_id: i64 = update.from_user_id;
    debug!(user_id, "Handling webhook update");

    let mut persistence = app_state.persistence.lock().await;
    let mut conversations = app_state.conversations.lock().await;

    let state: Conversation = conversations.get(&user_id).cloned().unwrap_or_default();
    let outcome: UpdateOutcome =
        handle_update(&mut persistence, &state, update, OffsetDateTime::now_utc());

    if outcome.state == Conversation::Idle {
        conversations.remove(&user_id);
    } else {
        conversations.insert(user_id, outcome.state);
    }

    Ok(Json(WebhookResponse {
        messages: outcome.messages,
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(|| async { "ok" }))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Cleaning Bot Server");

    match &args.database_url {
        Some(url) if url.starts_with("mysql://") => info!("Using MySQL database"),
        Some(path) => info!("Using file-based database at: {}", path),
        None => info!("Using in-memory database"),
    }
    let mut persistence: Persistence = Persistence::open(args.database_url.as_deref())?;
    persistence.verify_foreign_key_enforcement()?;

    let app_state: AppState = AppState::new(persistence, &args.bot_token);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
