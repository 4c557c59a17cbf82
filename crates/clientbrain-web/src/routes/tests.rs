use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clientbrain_config::ClientBrainConfig;
use warp::http::StatusCode;
use warp::test::request;

use super::routes;
use crate::auth::{AuthProvider, MemoryAuth};
use crate::email::{EmailError, EmailMessage, Mailer};
use crate::state::AppState;

/// Keeps every message so tests can inspect what was sent.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: EmailMessage) -> Result<(), EmailError> {
        Err(EmailError::Api("HTTP 500: boom".into()))
    }
}

fn state_with(auth: Arc<dyn AuthProvider>, mailer: Arc<dyn Mailer>) -> AppState {
    let mut config = ClientBrainConfig::default();
    config.globe.still_size = 96;
    AppState::new(config, auth, mailer)
}

fn seeded_auth() -> Arc<MemoryAuth> {
    Arc::new(MemoryAuth::new().with_user("user@example.com", "secret123"))
}

fn body_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).expect("json body")
}

// =============================================================================
// Waitlist
// =============================================================================

#[tokio::test]
async fn waitlist_accepts_email_and_notifies_operator() {
    let mailer = Arc::new(RecordingMailer::default());
    let state = state_with(seeded_auth(), mailer.clone());
    let operator = state.config.email.notify_address.clone();

    let res = request()
        .method("POST")
        .path("/api/waitlist")
        .json(&serde_json::json!({ "email": "test@example.com" }))
        .reply(&routes(state))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json(res.body()), serde_json::json!({ "success": true }));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, operator);
    assert_eq!(sent[0].from, "ClientBrain Waitlist <onboarding@resend.dev>");
    assert!(sent[0].subject.contains("test@example.com"));
    assert!(sent[0].html.contains("test@example.com"));
}

#[tokio::test]
async fn waitlist_rejects_missing_email() {
    let mailer = Arc::new(RecordingMailer::default());
    let res = request()
        .method("POST")
        .path("/api/waitlist")
        .json(&serde_json::json!({}))
        .reply(&routes(state_with(seeded_auth(), mailer.clone())))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(res.body()), serde_json::json!({ "error": "Email is required." }));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn waitlist_rejects_non_string_email() {
    let res = request()
        .method("POST")
        .path("/api/waitlist")
        .json(&serde_json::json!({ "email": 123 }))
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(res.body())["error"], "Email is required.");
}

#[tokio::test]
async fn waitlist_rejects_empty_email() {
    let res = request()
        .method("POST")
        .path("/api/waitlist")
        .json(&serde_json::json!({ "email": "" }))
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn waitlist_send_failure_is_500() {
    let res = request()
        .method("POST")
        .path("/api/waitlist")
        .json(&serde_json::json!({ "email": "test@example.com" }))
        .reply(&routes(state_with(seeded_auth(), Arc::new(FailingMailer))))
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json(res.body()),
        serde_json::json!({ "error": "Failed to process signup. Please try again." })
    );
}

#[tokio::test]
async fn waitlist_malformed_body_is_500() {
    let res = request()
        .method("POST")
        .path("/api/waitlist")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(res.body())["error"], "Failed to process signup. Please try again.");
}

// =============================================================================
// Route guard
// =============================================================================

#[tokio::test]
async fn dashboard_redirects_when_signed_out() {
    let filter = routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default())));
    for path in ["/dashboard", "/dashboard/settings"] {
        let res = request().path(path).reply(&filter).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        let location = res.headers()["location"].to_str().unwrap();
        assert!(location.contains("/login"), "{path}");
    }
}

#[tokio::test]
async fn unreadable_cookie_redirects() {
    let cookie = warp::http::HeaderValue::from_bytes(b"cb-session=\xff\xfe").unwrap();
    let res = request()
        .path("/dashboard")
        .header("cookie", cookie)
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/login");
}

#[tokio::test]
async fn unknown_session_redirects() {
    let res = request()
        .path("/dashboard")
        .header("cookie", "cb-session=not-a-real-token")
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn dashboard_passes_when_signed_in() {
    let auth = seeded_auth();
    let session = auth.sign_in("user@example.com", "secret123").await.unwrap();
    let cookie = format!("cb-session={}", session.access_token.as_str());
    let filter = routes(state_with(auth, Arc::new(RecordingMailer::default())));

    let res = request().path("/dashboard").header("cookie", &cookie).reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("location").is_none());
    let html = body_text(res.body());
    assert!(html.contains("Logged in as user@example.com"));
    assert_eq!(html.matches("Coming Soon").count(), 2);

    let res = request().path("/dashboard/settings").header("cookie", &cookie).reply(&filter).await;
    assert_ne!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(res.headers().get("location").is_none());
}

// =============================================================================
// Sign-in / sign-up / sign-out
// =============================================================================

#[tokio::test]
async fn login_success_sets_cookie_and_redirects() {
    let res = request()
        .method("POST")
        .path("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("email=user%40example.com&password=secret123")
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/dashboard");
    let cookie = res.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("cb-session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn login_failure_shows_provider_message() {
    let res = request()
        .method("POST")
        .path("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("email=user%40example.com&password=wrong")
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get("set-cookie").is_none());
    assert!(body_text(res.body()).contains("Invalid login credentials"));
}

#[tokio::test]
async fn signup_password_mismatch() {
    let auth = Arc::new(MemoryAuth::new());
    let res = request()
        .method("POST")
        .path("/signup")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("email=new%40example.com&password=abcdef1&confirm_password=abcdef2")
        .reply(&routes(state_with(auth.clone(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res.body()).contains("Passwords do not match"));
    // Nothing reached the provider.
    assert!(auth.sign_in("new@example.com", "abcdef1").await.is_err());
}

#[tokio::test]
async fn signup_provider_error_is_shown() {
    let res = request()
        .method("POST")
        .path("/signup")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("email=user%40example.com&password=secret123&confirm_password=secret123")
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res.body()).contains("User already registered"));
}

#[tokio::test]
async fn signup_success_enters_dashboard() {
    let res = request()
        .method("POST")
        .path("/signup")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("email=new%40example.com&password=longenough&confirm_password=longenough")
        .reply(&routes(state_with(Arc::new(MemoryAuth::new()), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/dashboard");
    assert!(res.headers().get("set-cookie").is_some());
}

#[tokio::test]
async fn logout_revokes_session_and_clears_cookie() {
    let auth = seeded_auth();
    let session = auth.sign_in("user@example.com", "secret123").await.unwrap();
    let cookie = format!("cb-session={}", session.access_token.as_str());
    let filter = routes(state_with(auth.clone(), Arc::new(RecordingMailer::default())));

    let res = request()
        .method("POST")
        .path("/logout")
        .header("cookie", &cookie)
        .reply(&filter)
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/login");
    assert!(res.headers()["set-cookie"].to_str().unwrap().contains("Max-Age=0"));
    assert_eq!(auth.session_count().await, 0);

    let res = request().path("/dashboard").header("cookie", &cookie).reply(&filter).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn public_pages_render() {
    let filter = routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default())));
    for (path, needle) in [("/", "Join Waitlist"), ("/login", "Welcome Back"), ("/signup", "Create Account")] {
        let res = request().path(path).reply(&filter).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert!(body_text(res.body()).contains(needle), "{path}");
    }
}

#[tokio::test]
async fn globe_still_is_png() {
    let res = request()
        .path("/globe.png?frame=3")
        .reply(&routes(state_with(seeded_auth(), Arc::new(RecordingMailer::default()))))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert_eq!(&res.body()[..8], b"\x89PNG\r\n\x1a\n");
}
