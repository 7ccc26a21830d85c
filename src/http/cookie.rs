// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session cookie jar
//!
//! The jar is a plain insertion-ordered list scoped to a single target host.
//! Lookups match by name prefix, because real servers often suffix their
//! session cookie names with instance identifiers (`sessionid_web03`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain attribute, empty if the server sent none
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Parse a Set-Cookie header value
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        if name.trim().is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name.trim(), value.trim());

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => cookie.domain = val.trim_start_matches('.').to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Check a list of cookies for one whose name starts with the given prefix.
pub fn has_token(cookies: &[Cookie], name_prefix: &str) -> bool {
    cookies.iter().any(|c| c.name.starts_with(name_prefix))
}

/// Insertion-ordered cookie storage for one target host
///
/// Entries are only ever replaced wholesale (on login) or merged by prefix
/// (on [`SessionJar::replace_by_prefix`]). Duplicate names are tolerated as a
/// list; requests carry every entry in jar order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionJar {
    cookies: Vec<Cookie>,
}

impl SessionJar {
    /// Create a new empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cookie, preserving insertion order
    pub fn push(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }

    /// True if any held cookie's name starts with the prefix
    pub fn has_token(&self, name_prefix: &str) -> bool {
        has_token(&self.cookies, name_prefix)
    }

    /// Replace every cookie under a name prefix with the matching entries of
    /// `found`.
    ///
    /// Existing entries whose name starts with the prefix are dropped
    /// unconditionally, even when `found` contains no match. Low-level
    /// plumbing for partial cookie refresh; the login path replaces the whole
    /// jar instead.
    pub fn replace_by_prefix(&mut self, found: &[Cookie], name_prefix: &str) {
        self.cookies.retain(|c| !c.name.starts_with(name_prefix));
        self.cookies.extend(
            found
                .iter()
                .filter(|c| c.name.starts_with(name_prefix))
                .cloned(),
        );
    }

    /// Replace the entire jar contents
    pub fn replace_all(&mut self, cookies: Vec<Cookie>) {
        self.cookies = cookies;
    }

    /// Render the Cookie request header for the held cookies, jar order
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        Some(
            self.cookies
                .iter()
                .map(|c| c.to_header_value())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Iterate the held cookies in order
    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    /// Get cookie count
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Clear all cookies
    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.cookies)
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        Ok(Self { cookies })
    }
}

impl From<Vec<Cookie>> for SessionJar {
    fn from(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let header = "sessionid=abc123; Domain=example.com; Path=/app; Secure; HttpOnly";
        let cookie = Cookie::parse(header).unwrap();

        assert_eq!(cookie.name, "sessionid");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/app");
        assert!(cookie.secure);
        assert!(cookie.http_only);
    }

    #[test]
    fn test_cookie_parse_max_age() {
        let cookie = Cookie::parse("token=xyz; Max-Age=3600").unwrap();
        assert!(cookie.expires.is_some());
        assert!(!cookie.is_expired());
    }

    #[test]
    fn test_cookie_parse_rejects_garbage() {
        assert!(Cookie::parse("no-equals-sign").is_none());
        assert!(Cookie::parse("=value-without-name").is_none());
    }

    #[test]
    fn test_has_token_prefix_match() {
        let cookies = vec![
            Cookie::new("sessionid_web03", "a"),
            Cookie::new("theme", "dark"),
        ];

        assert!(has_token(&cookies, "sessionid"));
        assert!(has_token(&cookies, "theme"));
        assert!(!has_token(&cookies, "csrf"));
        assert!(!has_token(&cookies, "essionid"));
    }

    #[test]
    fn test_cookie_header_preserves_order() {
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("foo", "bar"));
        jar.push(Cookie::new("baz", "qux"));

        assert_eq!(jar.cookie_header().unwrap(), "foo=bar; baz=qux");
    }

    #[test]
    fn test_empty_jar_has_no_header() {
        assert_eq!(SessionJar::new().cookie_header(), None);
    }

    #[test]
    fn test_replace_by_prefix() {
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("sess_a", "old"));
        jar.push(Cookie::new("other", "keep"));

        jar.replace_by_prefix(&[Cookie::new("sess_b", "new"), Cookie::new("junk", "no")], "sess");

        let names: Vec<&str> = jar.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["other", "sess_b"]);
    }

    #[test]
    fn test_replace_by_prefix_drops_on_empty_found() {
        // A refresh that found no new cookies still erases the old ones
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("sess", "a"));
        jar.push(Cookie::new("other", "b"));

        jar.replace_by_prefix(&[], "sess");

        assert_eq!(jar.len(), 1);
        assert_eq!(jar.iter().next().unwrap().name, "other");
    }

    #[test]
    fn test_replace_all() {
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("x", "1"));

        jar.replace_all(vec![Cookie::new("session", "abc")]);

        assert_eq!(jar.len(), 1);
        assert_eq!(jar.iter().next().unwrap().name, "session");
    }

    #[test]
    fn test_duplicate_names_tolerated() {
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("a", "1"));
        jar.push(Cookie::new("a", "2"));

        assert_eq!(jar.len(), 2);
        assert_eq!(jar.cookie_header().unwrap(), "a=1; a=2");
    }

    #[test]
    fn test_jar_json_export() {
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("session", "abc").domain("example.com"));

        let json = jar.to_json().unwrap();
        let restored = SessionJar::from_json(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert!(restored.has_token("session"));
    }
}
