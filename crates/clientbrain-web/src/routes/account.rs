//! Sign-in, sign-up, sign-out and the dashboard.

use std::convert::Infallible;

use clientbrain_common::SessionToken;
use serde::Deserialize;
use tracing::{info, warn};
use warp::http::{StatusCode, Uri};
use warp::reply::Response;
use warp::Reply;

use crate::auth::{AuthSession, User};
use crate::guard::{clear_session_cookie, session_cookie};
use crate::pages;
use crate::state::AppState;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn html(body: String, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::html(body), status).into_response()
}

fn see_other(location: &'static str) -> Response {
    warp::redirect::see_other(Uri::from_static(location)).into_response()
}

/// 303 to the dashboard, setting the session cookie when there is one.
fn enter_dashboard(state: &AppState, session: Option<&AuthSession>) -> Response {
    let redirect = see_other("/dashboard");
    match session {
        Some(s) => warp::reply::with_header(
            redirect,
            "set-cookie",
            session_cookie(state.cookie_name(), &s.access_token, state.config.auth.secure_cookie),
        )
        .into_response(),
        None => redirect,
    }
}

pub async fn login_page() -> Result<Response, Infallible> {
    Ok(html(pages::login(None, ""), StatusCode::OK))
}

pub async fn signup_page() -> Result<Response, Infallible> {
    Ok(html(pages::signup(None, ""), StatusCode::OK))
}

pub async fn login(form: LoginForm, state: AppState) -> Result<Response, Infallible> {
    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "signed in");
            Ok(enter_dashboard(&state, Some(&session)))
        }
        Err(e) => {
            warn!(error = %e, "sign-in failed");
            Ok(html(
                pages::login(Some(&e.user_message()), &form.email),
                StatusCode::UNAUTHORIZED,
            ))
        }
    }
}

pub async fn signup(form: SignupForm, state: AppState) -> Result<Response, Infallible> {
    if form.password != form.confirm_password {
        return Ok(html(
            pages::signup(Some(PASSWORD_MISMATCH), &form.email),
            StatusCode::BAD_REQUEST,
        ));
    }
    match state.auth.sign_up(&form.email, &form.password).await {
        Ok(session) => {
            info!(confirmed = session.is_some(), "signed up");
            Ok(enter_dashboard(&state, session.as_ref()))
        }
        Err(e) => {
            warn!(error = %e, "sign-up failed");
            Ok(html(
                pages::signup(Some(&e.user_message()), &form.email),
                StatusCode::BAD_REQUEST,
            ))
        }
    }
}

/// Revoke the session (best effort) and always clear the cookie.
pub async fn logout(token: Option<SessionToken>, state: AppState) -> Result<Response, Infallible> {
    if let Some(token) = token {
        if let Err(e) = state.auth.sign_out(&token).await {
            warn!(error = %e, "sign-out failed");
        }
    }
    Ok(warp::reply::with_header(
        see_other("/login"),
        "set-cookie",
        clear_session_cookie(state.cookie_name()),
    )
    .into_response())
}

/// `/dashboard` itself, or a 404 for deeper paths that have no page yet.
pub async fn dashboard(tail: warp::path::Tail, user: User) -> Result<Response, Infallible> {
    if tail.as_str().trim_matches('/').is_empty() {
        Ok(html(pages::dashboard(&user), StatusCode::OK))
    } else {
        Ok(html(pages::not_found(), StatusCode::NOT_FOUND))
    }
}
