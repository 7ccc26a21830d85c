// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request construction
//!
//! A [`Request`] is built in one shot from the session context: verb, path,
//! parameters, agent name and the current jar. Construction is pure; the jar
//! is read, never mutated.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use url::form_urlencoded;
use url::Url;

use super::cookie::SessionJar;
use super::{headers, DEFAULT_USER_AGENT, FORM_CONTENT_TYPE};
use crate::error::{Error, Result};

/// Request verbs the client can issue
///
/// A closed set: adding a verb means deciding its parameter encoding here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
}

/// Where request parameters are carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamEncoding {
    /// Form-encoded into the URL query string, empty body
    Query,
    /// Form-encoded into the request body
    Body,
}

impl Verb {
    /// Parameter encoding convention for this verb
    pub fn encoding(self) -> ParamEncoding {
        match self {
            Verb::Get | Verb::Head => ParamEncoding::Query,
            Verb::Post | Verb::Put => ParamEncoding::Body,
        }
    }

    /// Map to the transport method
    pub fn as_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Head => Method::HEAD,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
        }
    }

    /// Wire name of the verb
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
        }
    }
}

/// Ordered, multi-valued request parameters
///
/// Keys repeat; insertion order is preserved and the encoder canonicalizes
/// values, so callers append in whatever order they like.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append a pair, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// First value for a key, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get pair count
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A fully-formed request, ready to hand to the transport
#[derive(Debug, Clone)]
pub struct Request {
    /// Request verb
    pub verb: Verb,
    /// Absolute request URL, query already encoded for GET/HEAD
    pub url: Url,
    /// Request headers, session cookies included
    pub headers: HeaderMap,
    /// Form-encoded body for POST/PUT, None otherwise
    pub body: Option<Bytes>,
}

impl Request {
    /// Build a request against `host` with the session context applied.
    ///
    /// Parameters land in the query string or the body per
    /// [`Verb::encoding`]. Every cookie currently in the jar is attached, in
    /// jar order.
    pub fn build(
        verb: Verb,
        host: &Url,
        path: &str,
        params: &Params,
        agent: Option<&str>,
        jar: &SessionJar,
    ) -> Result<Self> {
        let mut url = resolve(host, path)?;

        let mut headers = HeaderMap::new();
        headers.insert(headers::ACCEPT, HeaderValue::from_static("*/*"));

        let agent = agent.unwrap_or(DEFAULT_USER_AGENT);
        let agent_value = HeaderValue::from_str(agent)
            .map_err(|_| Error::build(format!("agent name '{agent}' is not a valid header value")))?;
        headers.insert(headers::USER_AGENT, agent_value);

        let body = match verb.encoding() {
            ParamEncoding::Query => {
                if !params.is_empty() {
                    url.set_query(Some(&params.encode()));
                }
                None
            }
            ParamEncoding::Body => {
                headers.insert(headers::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                Some(Bytes::from(params.encode()))
            }
        };

        if let Some(cookie_header) = jar.cookie_header() {
            let value = HeaderValue::from_str(&cookie_header)
                .map_err(|_| Error::build("jar holds a cookie not representable as a header"))?;
            headers.insert(headers::COOKIE, value);
        }

        Ok(Self {
            verb,
            url,
            headers,
            body,
        })
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Join a path onto the host URL with exactly one separating slash.
pub(crate) fn resolve(host: &Url, path: &str) -> Result<Url> {
    if host.cannot_be_a_base() || host.host_str().is_none() {
        return Err(Error::host(
            host.as_str(),
            "expected an absolute URL with scheme and authority",
        ));
    }

    let joined = format!(
        "{}/{}",
        host.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cookie::Cookie;

    fn host() -> Url {
        Url::parse("http://example.com").unwrap()
    }

    #[test]
    fn test_resolve_single_separating_slash() {
        let url = resolve(&host(), "path/to/file.txt").unwrap();
        assert_eq!(url.as_str(), "http://example.com/path/to/file.txt");

        // Leading slash on the path and trailing slash on the host collapse
        let url = resolve(&Url::parse("http://example.com/").unwrap(), "/form.php").unwrap();
        assert_eq!(url.as_str(), "http://example.com/form.php");
    }

    #[test]
    fn test_resolve_rejects_baseless_host() {
        let err = resolve(&Url::parse("data:text/plain,hi").unwrap(), "x").unwrap_err();
        assert!(matches!(err, Error::Host { .. }));
    }

    #[test]
    fn test_get_params_go_to_query() {
        let params = Params::new().with("a", "foo").with("b", "bar");
        let req = Request::build(Verb::Get, &host(), "form.php", &params, None, &SessionJar::new())
            .unwrap();

        assert_eq!(req.url_str(), "http://example.com/form.php?a=foo&b=bar");
        assert!(req.body.is_none());
        assert!(req.headers.get(headers::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_get_without_params_has_no_query() {
        let req = Request::build(
            Verb::Get,
            &host(),
            "form.php",
            &Params::new(),
            None,
            &SessionJar::new(),
        )
        .unwrap();

        assert_eq!(req.url_str(), "http://example.com/form.php");
    }

    #[test]
    fn test_post_params_go_to_body() {
        let params = Params::new().with("a", "foo").with("b", "bar");
        let req = Request::build(Verb::Post, &host(), "form.php", &params, None, &SessionJar::new())
            .unwrap();

        assert_eq!(req.url_str(), "http://example.com/form.php");
        assert_eq!(req.body.as_deref(), Some("a=foo&b=bar".as_bytes()));
        assert_eq!(
            req.headers.get(headers::CONTENT_TYPE).unwrap(),
            FORM_CONTENT_TYPE
        );
    }

    #[test]
    fn test_default_headers() {
        let req = Request::build(
            Verb::Get,
            &host(),
            "x",
            &Params::new(),
            None,
            &SessionJar::new(),
        )
        .unwrap();

        assert_eq!(req.headers.get(headers::ACCEPT).unwrap(), "*/*");
        assert_eq!(
            req.headers.get(headers::USER_AGENT).unwrap(),
            DEFAULT_USER_AGENT
        );
        assert!(req.headers.get(headers::COOKIE).is_none());
    }

    #[test]
    fn test_agent_name_override() {
        let req = Request::build(
            Verb::Get,
            &host(),
            "x",
            &Params::new(),
            Some("NightCrawler/2.1"),
            &SessionJar::new(),
        )
        .unwrap();

        assert_eq!(req.headers.get(headers::USER_AGENT).unwrap(), "NightCrawler/2.1");
    }

    #[test]
    fn test_jar_attached_in_order() {
        let mut jar = SessionJar::new();
        jar.push(Cookie::new("session", "abc"));
        jar.push(Cookie::new("theme", "dark"));

        let req =
            Request::build(Verb::Get, &host(), "x", &Params::new(), None, &jar).unwrap();

        assert_eq!(
            req.headers.get(headers::COOKIE).unwrap(),
            "session=abc; theme=dark"
        );
    }

    #[test]
    fn test_verb_encoding_table() {
        assert_eq!(Verb::Get.encoding(), ParamEncoding::Query);
        assert_eq!(Verb::Head.encoding(), ParamEncoding::Query);
        assert_eq!(Verb::Post.encoding(), ParamEncoding::Body);
        assert_eq!(Verb::Put.encoding(), ParamEncoding::Body);
    }

    #[test]
    fn test_params_encode_escapes() {
        let params = Params::new().with("q", "a b&c");
        assert_eq!(params.encode(), "q=a+b%26c");
    }

    #[test]
    fn test_params_multi_value() {
        let mut params = Params::new();
        params.append("id", "1");
        params.append("id", "2");

        assert_eq!(params.encode(), "id=1&id=2");
        assert_eq!(params.get("id"), Some("1"));
    }
}
