//! Cookie-backed token store.
//!
//! The session is two independent cookie slots, each carrying one token and
//! its own lifetime. The store keeps no state of its own and does not
//! validate token contents; it only moves values between HTTP headers and
//! the handlers.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use chrono::DateTime;
use secrecy::SecretString;

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Credential pair read from the request cookie slots. Either slot may be
/// absent; expiry is the browser's business, not ours.
#[derive(Debug, Default)]
pub struct SessionTokens {
    pub access: Option<SecretString>,
    pub refresh: Option<SecretString>,
}

impl SessionTokens {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut tokens = Self::default();

        for (name, value) in cookie_pairs(headers) {
            match name.as_str() {
                ACCESS_TOKEN => tokens.access = Some(SecretString::from(value)),
                REFRESH_TOKEN => tokens.refresh = Some(SecretString::from(value)),
                _ => {}
            }
        }

        tokens
    }
}

fn cookie_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };

        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            pairs.push((key.to_string(), val.to_string()));
        }
    }

    pairs
}

/// Build a `Set-Cookie` value for a token slot: scoped to the whole site,
/// unreadable from page scripts, never sent cross-site, and expiring at the
/// Unix-seconds timestamp the auth API returned.
pub fn set_cookie(
    name: &str,
    value: &str,
    expires_at: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Strict");

    if let Some(date) = http_date(expires_at) {
        cookie.push_str("; Expires=");
        cookie.push_str(&date);
    }

    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
}

/// Build a `Set-Cookie` value that deletes a token slot.
pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");

    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
}

/// Rewrite the inbound `Cookie` header so downstream handlers observe the
/// post-refresh token slots. Cookies other than the two slots are preserved.
pub fn replace_request_cookies(
    headers: &mut HeaderMap,
    access: Option<&str>,
    refresh: Option<&str>,
) {
    let mut pairs: Vec<(String, String)> = cookie_pairs(headers)
        .into_iter()
        .filter(|(name, _)| name != ACCESS_TOKEN && name != REFRESH_TOKEN)
        .collect();

    if let Some(token) = access {
        pairs.push((ACCESS_TOKEN.to_string(), token.to_string()));
    }

    if let Some(token) = refresh {
        pairs.push((REFRESH_TOKEN.to_string(), token.to_string()));
    }

    headers.remove(COOKIE);

    if pairs.is_empty() {
        return;
    }

    let joined = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");

    if let Ok(value) = HeaderValue::from_str(&joined) {
        headers.insert(COOKIE, value);
    }
}

// RFC 7231 IMF-fixdate, the only format cookies accept
fn http_date(unix_seconds: i64) -> Option<String> {
    DateTime::from_timestamp(unix_seconds, 0)
        .map(|date| date.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_set_cookie_attributes() {
        // 2025-01-01T00:00:00Z
        let cookie = set_cookie(ACCESS_TOKEN, "abc", 1_735_689_600, false).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "access_token=abc; Path=/; HttpOnly; SameSite=Strict; \
             Expires=Wed, 01 Jan 2025 00:00:00 GMT"
        );
    }

    #[test]
    fn test_set_cookie_secure() {
        let cookie = set_cookie(REFRESH_TOKEN, "abc", 1_735_689_600, true).unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        let cookie = clear_cookie(ACCESS_TOKEN, false).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "access_token=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0"
        );

        let cookie = clear_cookie(ACCESS_TOKEN, true).unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=a1 ;refresh_token=r1"),
        );

        let tokens = SessionTokens::from_headers(&headers);
        assert_eq!(tokens.access.unwrap().expose_secret(), "a1");
        assert_eq!(tokens.refresh.unwrap().expose_secret(), "r1");
    }

    #[test]
    fn test_from_headers_absent() {
        let headers = HeaderMap::new();
        let tokens = SessionTokens::from_headers(&headers);
        assert!(tokens.access.is_none());
        assert!(tokens.refresh.is_none());
    }

    #[test]
    fn test_replace_request_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=old; refresh_token=old"),
        );

        replace_request_cookies(&mut headers, Some("a2"), Some("r2"));

        assert_eq!(
            headers.get(COOKIE).unwrap().to_str().unwrap(),
            "theme=dark; access_token=a2; refresh_token=r2"
        );
    }

    #[test]
    fn test_replace_request_cookies_strip() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("access_token=old; refresh_token=old"),
        );

        replace_request_cookies(&mut headers, None, None);

        assert!(headers.get(COOKIE).is_none());
    }

    #[test]
    fn test_replace_request_cookies_keeps_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; refresh_token=old"),
        );

        replace_request_cookies(&mut headers, None, None);

        assert_eq!(headers.get(COOKIE).unwrap().to_str().unwrap(), "theme=dark");
    }

    #[test]
    fn test_http_date_out_of_range() {
        assert!(http_date(i64::MAX).is_none());
    }
}
