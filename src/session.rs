//! Opaque per-browser identity for attributing calculation history.
//!
//! There are no user accounts: the first request mints a random identity
//! and stores it in a long-lived cookie. History rows are keyed by that
//! value, and deletes are only honored for the owning identity.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

/// Cookie holding the opaque identity.
pub const SESSION_COOKIE: &str = "nutrimodel_session";

/// Returns the identity from the jar, minting a fresh one and attaching
/// the cookie when it is missing or empty.
pub fn ensure_identity(jar: CookieJar) -> (CookieJar, String) {
    let existing = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    if let Some(identity) = existing {
        return (jar, identity);
    }

    let identity = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, identity.clone()))
        .path("/")
        .http_only(true)
        .permanent()
        .build();

    (jar.add(cookie), identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderMap;

    #[test]
    fn test_missing_cookie_mints_identity() {
        let jar = CookieJar::from_headers(&HeaderMap::new());
        let (jar, identity) = ensure_identity(jar);

        assert!(!identity.is_empty());
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().value(), identity);
    }

    #[test]
    fn test_existing_cookie_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "nutrimodel_session=abc123".parse().unwrap());
        let jar = CookieJar::from_headers(&headers);

        let (_, identity) = ensure_identity(jar);
        assert_eq!(identity, "abc123");
    }

    #[test]
    fn test_identity_stable_across_calls() {
        let jar = CookieJar::from_headers(&HeaderMap::new());
        let (jar, first) = ensure_identity(jar);
        let (_, second) = ensure_identity(jar);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_cookie_value_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "nutrimodel_session=".parse().unwrap());
        let jar = CookieJar::from_headers(&headers);

        let (_, identity) = ensure_identity(jar);
        assert!(!identity.is_empty());
    }
}
