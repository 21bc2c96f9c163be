//! Referral attribution cookie.

/// Name of the cookie that remembers which campaign sent a visitor.
pub const COOKIE_NAME: &str = "_referral_campaign";

/// 30 days.
pub const MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Build the Set-Cookie header value carrying a campaign id.
/// An empty `domain` yields a host-only cookie.
pub fn campaign_cookie(campaign_id: i64, path: &str, domain: &str) -> String {
    let mut cookie = format!("{COOKIE_NAME}={campaign_id}; Path={path}; Max-Age={MAX_AGE_SECS}");
    if !domain.is_empty() {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    cookie.push_str("; SameSite=Lax");
    cookie
}

/// Value of the first `name=value` pair in a Cookie header.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}
