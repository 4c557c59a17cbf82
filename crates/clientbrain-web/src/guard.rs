//! Session cookies and the protected-route guard.

use std::convert::Infallible;

use clientbrain_common::SessionToken;
use tracing::{debug, warn};
use warp::http::header::COOKIE;
use warp::http::{HeaderMap, Uri};
use warp::{Filter, Rejection, Reply};

use crate::auth::User;
use crate::state::{with_state, AppState};

/// Rejection raised when a protected route has no signed-in user.
#[derive(Debug)]
pub struct Unauthenticated;

impl warp::reject::Reject for Unauthenticated {}

/// Value of cookie `name` in a `Cookie` header.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// `Set-Cookie` value that stores a session token.
pub fn session_cookie(name: &str, token: &SessionToken, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{name}={}; Path=/; HttpOnly; SameSite=Lax{secure}", token.as_str())
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Session token from the `Cookie` headers, if any.
pub fn token_from_headers(headers: &HeaderMap, name: &str) -> Option<SessionToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| find_cookie(header, name))
        .map(SessionToken::new)
}

/// Extract the session token, if the request carries one.
///
/// An unreadable `Cookie` header counts as no token.
pub fn session_token(state: AppState) -> impl Filter<Extract = (Option<SessionToken>,), Error = Infallible> + Clone {
    warp::header::headers_cloned()
        .and(with_state(state))
        .map(|headers: HeaderMap, state: AppState| token_from_headers(&headers, state.cookie_name()))
}

/// Resolve the signed-in user or reject with [`Unauthenticated`].
///
/// A failed lookup counts as signed out.
pub fn require_user(state: AppState) -> impl Filter<Extract = (User,), Error = Rejection> + Clone {
    session_token(state.clone())
        .and(with_state(state))
        .and_then(|token: Option<SessionToken>, state: AppState| async move {
            let Some(token) = token else {
                debug!("no session cookie");
                return Err(warp::reject::custom(Unauthenticated));
            };
            match state.auth.get_user(&token).await {
                Ok(Some(user)) => Ok(user),
                Ok(None) => {
                    debug!("session token not recognised");
                    Err(warp::reject::custom(Unauthenticated))
                }
                Err(e) => {
                    warn!(error = %e, "session lookup failed");
                    Err(warp::reject::custom(Unauthenticated))
                }
            }
        })
}

/// Turn [`Unauthenticated`] into a temporary (307) redirect to the login
/// page. Other rejections pass through.
pub async fn redirect_unauthenticated(err: Rejection) -> Result<impl Reply, Rejection> {
    if err.find::<Unauthenticated>().is_some() {
        return Ok(warp::redirect::temporary(Uri::from_static("/login")));
    }
    Err(err)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::HeaderValue;

    #[test]
    fn finds_named_cookie() {
        let header = "theme=dark; cb-session=abc123; other=1";
        assert_eq!(find_cookie(header, "cb-session").as_deref(), Some("abc123"));
        assert_eq!(find_cookie(header, "theme").as_deref(), Some("dark"));
        assert_eq!(find_cookie(header, "missing"), None);
    }

    #[test]
    fn empty_cookie_is_absent() {
        assert_eq!(find_cookie("cb-session=", "cb-session"), None);
    }

    #[test]
    fn cookie_prefix_does_not_match() {
        assert_eq!(find_cookie("cb-session-old=x", "cb-session"), None);
    }

    #[test]
    fn unreadable_cookie_header_is_skipped() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_bytes(b"cb-session=\xff\xfe").unwrap());
        assert_eq!(token_from_headers(&headers, "cb-session"), None);

        headers.append(COOKIE, HeaderValue::from_static("cb-session=ok"));
        assert_eq!(
            token_from_headers(&headers, "cb-session").map(|t| t.as_str().to_string()),
            Some("ok".to_string())
        );
    }

    #[test]
    fn session_cookie_attributes() {
        let token = SessionToken::new("tok");
        assert_eq!(
            session_cookie("cb-session", &token, false),
            "cb-session=tok; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(session_cookie("cb-session", &token, true).ends_with("; Secure"));
        assert!(clear_session_cookie("cb-session").contains("Max-Age=0"));
    }
}
