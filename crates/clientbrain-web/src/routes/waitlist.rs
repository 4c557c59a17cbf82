//! `POST /api/waitlist`: record interest and notify the operator.

use std::convert::Infallible;

use serde_json::{json, Value};
use tracing::{error, info};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{Json, WithStatus};

use crate::email::waitlist_notification;
use crate::state::AppState;

pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const SIGNUP_FAILED: &str = "Failed to process signup. Please try again.";

fn reply(body: Value, status: StatusCode) -> WithStatus<Json> {
    warp::reply::with_status(warp::reply::json(&body), status)
}

fn failure() -> WithStatus<Json> {
    reply(json!({ "error": SIGNUP_FAILED }), StatusCode::INTERNAL_SERVER_ERROR)
}

/// Handle a raw waitlist body.
///
/// Missing or non-string `email` is a 400. A body that is not JSON at all,
/// or a failed send, is a 500 with a generic message.
pub async fn join(body: Bytes, state: AppState) -> Result<WithStatus<Json>, Infallible> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => {
            error!("waitlist: request body is not a JSON object");
            return Ok(failure());
        }
        Ok(v) => v,
    };

    let email = match payload.get("email").and_then(Value::as_str) {
        Some(email) if !email.is_empty() => email,
        _ => return Ok(reply(json!({ "error": EMAIL_REQUIRED }), StatusCode::BAD_REQUEST)),
    };

    let message = waitlist_notification(&state.config.email, email);
    match state.mailer.send(message).await {
        Ok(()) => {
            info!("waitlist signup notified");
            Ok(reply(json!({ "success": true }), StatusCode::OK))
        }
        Err(e) => {
            error!(error = %e, "waitlist: notification failed");
            Ok(failure())
        }
    }
}
