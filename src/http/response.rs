// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use super::cookie::Cookie;
use super::headers;

/// Owned HTTP response
///
/// The body is fully read by the transport layer before this exists; HTML and
/// binary alike are handed back as bytes and rendered as text on request.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after any redirects the transport followed)
    pub url: Url,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, url: Url) -> Self {
        Self {
            status,
            headers,
            body,
            url,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(headers::CONTENT_TYPE)
    }

    /// Get raw Set-Cookie header values
    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_all(headers::SET_COOKIE)
    }

    /// Parse the Set-Cookie headers into cookies, response order
    pub fn tokens(&self) -> Vec<Cookie> {
        self.set_cookies()
            .into_iter()
            .filter_map(Cookie::parse)
            .collect()
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response_with_headers(headers: HeaderMap) -> Response {
        Response::new(
            StatusCode::OK,
            headers,
            Bytes::from("Hello, World!"),
            Url::parse("http://example.com/page").unwrap(),
        )
    }

    #[test]
    fn test_response_text() {
        let resp = response_with_headers(HeaderMap::new());

        assert!(resp.is_success());
        assert_eq!(resp.text_lossy(), "Hello, World!");
        assert_eq!(resp.body_len(), 13);
    }

    #[test]
    fn test_tokens_from_set_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(
            "set-cookie",
            HeaderValue::from_static("sessionid=abc; Path=/; HttpOnly"),
        );
        headers.append("set-cookie", HeaderValue::from_static("theme=dark"));

        let tokens = response_with_headers(headers).tokens();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].name, "sessionid");
        assert!(tokens[0].http_only);
        assert_eq!(tokens[1].name, "theme");
    }

    #[test]
    fn test_tokens_skip_malformed_headers() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("not a cookie"));
        headers.append("set-cookie", HeaderValue::from_static("ok=1"));

        let tokens = response_with_headers(headers).tokens();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "ok");
    }
}
