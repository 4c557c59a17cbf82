//! Server-rendered HTML pages.
//!
//! Plain `format!` templates. Anything user-supplied goes through
//! [`escape_html`] before it reaches the markup.

use crate::auth::User;
use crate::email::escape_html;

const STYLE: &str = r#"
*{box-sizing:border-box;margin:0;padding:0}
body{background:#0a0a0a;color:#fff;font-family:system-ui,-apple-system,sans-serif;line-height:1.5}
a{color:#9ca3af;text-decoration:none}a:hover{color:#fff}
.accent{color:#4F8EF7}
nav{display:flex;justify-content:space-between;align-items:center;padding:16px 32px;border-bottom:1px solid #222;background:#111}
.brand{font-weight:700;font-size:20px;letter-spacing:-0.02em}
.center{min-height:100vh;display:flex;align-items:center;justify-content:center;padding:16px}
.card{width:100%;max-width:28rem;background:#111;border:1px solid #222;border-radius:12px;padding:32px}
.card h1{font-size:24px;text-align:center}
.muted{color:#9ca3af}
label{display:block;font-size:14px;color:#9ca3af;margin:16px 0 6px}
input{width:100%;background:#1a1a1a;color:#fff;border:1px solid #333;border-radius:6px;padding:12px 16px}
input:focus{outline:none;border-color:#4F8EF7}
button{background:#4F8EF7;color:#fff;border:0;border-radius:6px;padding:12px 16px;font-weight:500;cursor:pointer}
button:hover{background:#3B7BE8}
.wide{width:100%;margin-top:24px}
.ghost{background:transparent;border:1px solid #fff}
.ghost:hover{background:#fff;color:#000}
.error{color:#ef4444;font-size:14px;margin-top:8px;font-weight:500}
.hero{text-align:center;padding:120px 24px 0}
.hero h1{font-size:56px;line-height:1.08;max-width:56rem;margin:0 auto;letter-spacing:-0.02em}
.hero p{max-width:36rem;margin:24px auto 0;color:rgba(255,255,255,.5)}
.waitlist{display:flex;gap:12px;max-width:28rem;margin:40px auto 0}
.waitlist input{flex:1}
.hint{font-size:12px;color:rgba(255,255,255,.25);margin-top:16px}
.globe{display:block;margin:48px auto 0;width:min(520px,90vw);height:auto}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(260px,1fr));gap:24px;max-width:64rem;margin:64px auto;padding:0 24px}
.tile{position:relative;background:#111;border:1px solid #222;border-radius:12px;padding:32px}
.tile h3{font-size:20px;margin-bottom:12px}
.badge{position:absolute;top:16px;right:16px;background:#222;color:#888;font-size:12px;padding:4px 10px;border-radius:999px;text-transform:uppercase;font-weight:600}
footer{text-align:center;color:#555;font-size:13px;padding:48px 0}
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error" role="alert">{}</div>"#, escape_html(e)))
        .unwrap_or_default()
}

const WAITLIST_SCRIPT: &str = r#"
document.getElementById('waitlist-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  const input = e.target.querySelector('input[name=email]');
  const status = document.getElementById('waitlist-status');
  try {
    const res = await fetch('/api/waitlist', {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify({ email: input.value }),
    });
    const data = await res.json();
    status.textContent = res.ok ? "You're on the list." : data.error;
    if (res.ok) input.value = '';
  } catch (_) {
    status.textContent = 'Failed to process signup. Please try again.';
  }
});
"#;

/// Landing page: hero, waitlist form, globe still, features.
pub fn landing() -> String {
    let body = format!(
        r#"<nav><span class="brand">Client<span class="accent">Brain</span></span><a href="/login">Sign in</a></nav>
<section class="hero" id="waitlist">
  <h1>Know exactly where every client stands. <span class="accent">Every morning.</span></h1>
  <p>ClientBrain connects your Gmail and Slack and sends you a daily AI briefing, organized by client. No more digging.</p>
  <form class="waitlist" id="waitlist-form">
    <input type="email" name="email" required placeholder="you@company.com">
    <button type="submit">Join Waitlist</button>
  </form>
  <p class="hint" id="waitlist-status">No spam. Unsubscribe anytime.</p>
  <img class="globe" src="/globe.png" width="520" height="520" alt="Rotating globe of connected points">
</section>
<section class="grid">
  <div class="tile"><h3>Daily briefing</h3><p class="muted">One email every morning with what changed for each client overnight.</p></div>
  <div class="tile"><h3>Gmail and Slack</h3><p class="muted">Conversations from both places, grouped by the client they are about.</p></div>
  <div class="tile"><h3>Nothing to file</h3><p class="muted">No tagging or folders. Threads are matched to clients automatically.</p></div>
</section>
<footer>&copy; ClientBrain</footer>
<script>{WAITLIST_SCRIPT}</script>"#
    );
    layout("ClientBrain", &body)
}

/// Sign-in form, optionally with an error and the email re-filled.
pub fn login(error: Option<&str>, email: &str) -> String {
    let body = format!(
        r#"<div class="center"><div class="card">
  <h1>Welcome Back</h1>
  <p class="muted" style="text-align:center;margin-bottom:16px">Sign in to your ClientBrain account</p>
  <form method="post" action="/login">
    <label for="email">Email</label>
    <input id="email" name="email" type="email" required placeholder="you@example.com" value="{email}">
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required placeholder="••••••••">
    {error}
    <button class="wide" type="submit">Sign In</button>
  </form>
  <p style="text-align:center;margin-top:24px"><a href="/signup">Don't have an account? Sign up</a></p>
</div></div>"#,
        email = escape_html(email),
        error = error_block(error),
    );
    layout("Sign in · ClientBrain", &body)
}

/// Sign-up form with password confirmation.
pub fn signup(error: Option<&str>, email: &str) -> String {
    let body = format!(
        r#"<div class="center"><div class="card">
  <h1>Create Account</h1>
  <p class="muted" style="text-align:center;margin-bottom:16px">Join ClientBrain today</p>
  <form method="post" action="/signup">
    <label for="email">Email</label>
    <input id="email" name="email" type="email" required placeholder="you@example.com" value="{email}">
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required placeholder="••••••••">
    <label for="confirm_password">Confirm Password</label>
    <input id="confirm_password" name="confirm_password" type="password" required placeholder="••••••••">
    {error}
    <button class="wide" type="submit">Sign Up</button>
  </form>
  <p style="text-align:center;margin-top:24px"><a href="/login">Already have an account? Sign in</a></p>
</div></div>"#,
        email = escape_html(email),
        error = error_block(error),
    );
    layout("Sign up · ClientBrain", &body)
}

/// Signed-in home with the upcoming integrations.
pub fn dashboard(user: &User) -> String {
    let body = format!(
        r#"<nav><span class="brand">ClientBrain</span>
  <form method="post" action="/logout"><button class="ghost" type="submit">Sign Out</button></form>
</nav>
<main style="max-width:64rem;margin:0 auto;padding:48px 24px">
  <h1 style="font-size:30px">Welcome back</h1>
  <p class="muted" style="margin-bottom:40px">Logged in as {email}</p>
  <div class="grid" style="margin:0;padding:0">
    <div class="tile"><div class="badge">Coming Soon</div><h3>Connect Gmail</h3>
      <p class="muted">Sync your email communications with ClientBrain automatically. Keep track of every conversation without leaving the app.</p></div>
    <div class="tile"><div class="badge">Coming Soon</div><h3>Connect Slack</h3>
      <p class="muted">Sync your team messages with ClientBrain to keep track of conversations, tasks, and updates seamlessly.</p></div>
  </div>
</main>"#,
        email = escape_html(&user.email),
    );
    layout("Dashboard · ClientBrain", &body)
}

pub fn not_found() -> String {
    layout(
        "Not found · ClientBrain",
        r#"<div class="center"><div class="card"><h1>Page not found</h1><p class="muted" style="text-align:center;margin-top:12px"><a href="/">Back to ClientBrain</a></p></div></div>"#,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_shows_escaped_error_and_email() {
        let html = login(Some("Invalid <login>"), "a\"b@x.io");
        assert!(html.contains("Invalid &lt;login&gt;"));
        assert!(html.contains(r#"value="a&quot;b@x.io""#));
    }

    #[test]
    fn login_without_error_has_no_alert() {
        assert!(!login(None, "").contains("role=\"alert\""));
    }

    #[test]
    fn signup_has_confirmation_field() {
        let html = signup(Some("Passwords do not match"), "");
        assert!(html.contains("confirm_password"));
        assert!(html.contains("Passwords do not match"));
    }

    #[test]
    fn dashboard_lists_integrations() {
        let user = User {
            id: "user-1".into(),
            email: "user@example.com".into(),
        };
        let html = dashboard(&user);
        assert!(html.contains("Logged in as user@example.com"));
        assert_eq!(html.matches("Coming Soon").count(), 2);
        assert!(html.contains("Connect Gmail"));
        assert!(html.contains("Connect Slack"));
        assert!(html.contains("Sign Out"));
    }

    #[test]
    fn landing_has_waitlist_and_globe() {
        let html = landing();
        assert!(html.contains("/api/waitlist"));
        assert!(html.contains(r#"src="/globe.png""#));
    }
}
