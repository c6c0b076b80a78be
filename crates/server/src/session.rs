// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Webhook secret extraction for the server.
//!
//! The chat platform echoes the configured secret in a header on every
//! webhook call. Requests without it never reach the update handler.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::AppState;

/// Header carrying the webhook secret.
pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Extractor proving the request carries the configured webhook secret.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     _secret: VerifiedWebhook,
///     Json(update): Json<ChatUpdate>,
/// ) -> Json<WebhookResponse> {
///     ...
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the header is missing, is not visible
/// ASCII, or does not match the secret.
pub struct VerifiedWebhook;

impl FromRequestParts<AppState> for VerifiedWebhook {
    type Rejection = WebhookAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(SECRET_HEADER)
            .ok_or_else(|| {
                debug!("Missing webhook secret header");
                WebhookAuthError::MissingSecret
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid webhook secret header encoding");
                WebhookAuthError::InvalidSecret
            })?;

        if presented != state.secret.as_ref() {
            warn!("Webhook secret mismatch");
            return Err(WebhookAuthError::InvalidSecret);
        }

        Ok(Self)
    }
}

/// Webhook secret errors, converted to 401 responses.
#[derive(Debug)]
pub enum WebhookAuthError {
    /// The secret header is missing.
    MissingSecret,
    /// The secret header does not match.
    InvalidSecret,
}

impl IntoResponse for WebhookAuthError {
    fn into_response(self) -> Response {
        let message: &str = match self {
            Self::MissingSecret => "Missing webhook secret",
            Self::InvalidSecret => "Invalid webhook secret",
        };

        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
