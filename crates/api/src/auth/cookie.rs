pub const SESSION_COOKIE_NAME: &str = "token";

/// Sink for `Set-Cookie` values produced while resolving a request.
pub trait SessionCookies: Sync {
    fn set_cookie(&self, value: String);
}

/// Session cookie carrying the signed token. Not `HttpOnly`: the web client
/// reads it from script.
pub fn build_session_cookie(
    token: &str,
    max_age_secs: u64,
    cookie_domain: &Option<String>,
    secure: bool,
) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };

    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax{}",
        SESSION_COOKIE_NAME, token, max_age_secs, secure_flag
    );

    if let Some(domain) = cookie_domain {
        cookie.push_str(&format!("; Domain={}", domain));
    }

    cookie
}

pub fn extract_session_token(cookie_header: &str) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE_NAME);
    for part in cookie_header.split(';') {
        let trimmed = part.trim();
        if let Some(value) = trimmed.strip_prefix(prefix.as_str()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
