//! Route table for the site.
//!
//! | route                 | handler                      |
//! |-----------------------|------------------------------|
//! | `GET /`               | landing page                 |
//! | `GET /globe.png`      | [`globe::still`]             |
//! | `POST /api/waitlist`  | [`waitlist::join`]           |
//! | `GET, POST /login`    | [`account::login`]           |
//! | `GET, POST /signup`   | [`account::signup`]          |
//! | `POST /logout`        | [`account::logout`]          |
//! | `GET /dashboard/...`  | [`account::dashboard`], guarded |

pub mod account;
pub mod globe;
pub mod waitlist;

#[cfg(test)]
mod tests;

use clientbrain_common::new_correlation_id;
use warp::{Filter, Rejection, Reply};

use crate::guard::{redirect_unauthenticated, require_user, session_token};
use crate::pages;
use crate::state::{with_state, AppState};

/// Largest accepted request body.
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Every route, with the login redirect applied. Each request runs in a
/// `request` span tagged with a fresh correlation id.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::get()
        .and(warp::path::end())
        .map(|| warp::reply::html(pages::landing()));

    let globe = warp::get()
        .and(warp::path!("globe.png"))
        .and(warp::query::<globe::StillQuery>())
        .and(with_state(state.clone()))
        .and_then(globe::still);

    let waitlist = warp::post()
        .and(warp::path!("api" / "waitlist"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(waitlist::join);

    let login_page = warp::get()
        .and(warp::path!("login"))
        .and_then(account::login_page);

    let login = warp::post()
        .and(warp::path!("login"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and(with_state(state.clone()))
        .and_then(account::login);

    let signup_page = warp::get()
        .and(warp::path!("signup"))
        .and_then(account::signup_page);

    let signup = warp::post()
        .and(warp::path!("signup"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and(with_state(state.clone()))
        .and_then(account::signup);

    let logout = warp::post()
        .and(warp::path!("logout"))
        .and(session_token(state.clone()))
        .and(with_state(state.clone()))
        .and_then(account::logout);

    let dashboard = warp::get()
        .and(warp::path("dashboard"))
        .and(warp::path::tail())
        .and(require_user(state))
        .and_then(account::dashboard);

    index
        .or(globe)
        .or(waitlist)
        .or(login_page)
        .or(login)
        .or(signup_page)
        .or(signup)
        .or(logout)
        .or(dashboard)
        .recover(redirect_unauthenticated)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "request",
                id = %new_correlation_id(),
                method = %info.method(),
                path = %info.path(),
            )
        }))
}
