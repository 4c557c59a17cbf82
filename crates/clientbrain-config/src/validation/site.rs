//! Validation for the web site sections: server, auth, and email.

use crate::schema::{AuthProviderKind, ClientBrainConfig, EmailProviderKind};

/// Validate listener settings.
pub(crate) fn validate_server(errors: &mut Vec<String>, config: &ClientBrainConfig) {
    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".into());
    }
    if config.server.port == 0 {
        errors.push("server.port = 0 is out of range [1, 65535]".into());
    }
}

/// Validate auth provider prerequisites.
pub(crate) fn validate_auth(errors: &mut Vec<String>, config: &ClientBrainConfig) {
    let auth = &config.auth;
    if auth.session_cookie.is_empty()
        || !auth
            .session_cookie
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.push(format!(
            "auth.session_cookie = {:?} is not a valid cookie name",
            auth.session_cookie
        ));
    }
    if auth.provider == AuthProviderKind::Supabase && !auth.url.starts_with("http") {
        errors.push("auth.url must be an http(s) URL when auth.provider = \"supabase\"".into());
    }
}

/// Validate email delivery prerequisites.
pub(crate) fn validate_email(errors: &mut Vec<String>, config: &ClientBrainConfig) {
    let email = &config.email;
    if !email.notify_address.contains('@') {
        errors.push(format!(
            "email.notify_address = {:?} is not an email address",
            email.notify_address
        ));
    }
    if email.from.trim().is_empty() {
        errors.push("email.from must not be empty".into());
    }
    if email.provider == EmailProviderKind::Resend && !email.api_url.starts_with("http") {
        errors.push("email.api_url must be an http(s) URL when email.provider = \"resend\"".into());
    }
}
