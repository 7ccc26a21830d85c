// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Target server session context
//!
//! [`TargetServer`] is created once per scraping session and owns all mutable
//! session state: the cookie jar, the fetch counter and the remembered login
//! credentials. Every operation takes `&mut self`, so one context cannot be
//! shared between concurrent callers without external synchronization.
//!
//! Lifecycle: unauthenticated on construction, authenticated after a
//! successful [`TargetServer::login`], and kept authenticated heuristically by
//! replaying the login every `connections_per_login` fetches. A session the
//! server expires early is not detected here; it surfaces as logged-out page
//! content until the next periodic re-login.

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};
use crate::http::{has_token, Params, Request, Response, SessionJar, Verb};
use crate::scraper::config::{ReloginFailure, ScraperConfig};

/// Remembered form login, replayed on every re-login
#[derive(Debug, Clone)]
struct LoginCredentials {
    path: String,
    form: Params,
}

/// Result of a successful fetch
#[derive(Debug)]
pub struct Page {
    /// Full response body as text
    pub body: String,
    /// Error from an automatic re-login triggered by this fetch, under the
    /// [`ReloginFailure::Surface`] policy. The body above is valid either way.
    pub relogin_failure: Option<Error>,
}

/// Session context for one remote host
pub struct TargetServer {
    /// Base URL all request paths resolve against
    host: Url,
    config: ScraperConfig,
    /// Session cookies, replaced wholesale on every successful login
    jar: SessionJar,
    /// Fetches since construction; never reset, so the re-login threshold
    /// counts from the start of the session, not from the last login
    num_connections: u64,
    remembered: Option<LoginCredentials>,
    client: Client,
    login_client: Client,
}

impl TargetServer {
    /// Create a session context with default configuration
    pub fn new(host: impl AsRef<str>) -> Result<Self> {
        Self::with_config(host, ScraperConfig::default())
    }

    /// Create a session context for `host`
    ///
    /// Fails if `host` is not an absolute URL with scheme and authority.
    pub fn with_config(host: impl AsRef<str>, config: ScraperConfig) -> Result<Self> {
        let host = Url::parse(host.as_ref())?;
        if host.cannot_be_a_base() || host.host_str().is_none() {
            return Err(Error::host(
                host.as_str(),
                "expected an absolute URL with scheme and authority",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| Error::build(format!("http client: {e}")))?;

        // Login responses must come back as-is. It's common to 302 after a
        // successful login, and the redirect target no longer carries the
        // session cookie.
        let login_client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| Error::build(format!("login client: {e}")))?;

        Ok(Self {
            host,
            config,
            jar: SessionJar::new(),
            num_connections: 0,
            remembered: None,
            client,
            login_client,
        })
    }

    /// Get the base URL
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Get the configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Get the session cookie jar
    pub fn jar(&self) -> &SessionJar {
        &self.jar
    }

    /// Get the jar mutably, for callers doing partial cookie refresh via
    /// [`SessionJar::replace_by_prefix`]
    pub fn jar_mut(&mut self) -> &mut SessionJar {
        &mut self.jar
    }

    /// Fetches issued since construction
    pub fn connections(&self) -> u64 {
        self.num_connections
    }

    /// Whether a login has succeeded and its credentials are remembered
    pub fn is_authenticated(&self) -> bool {
        self.remembered.is_some()
    }

    /// Log in via an HTML form POST to `path`.
    ///
    /// Redirects are not followed; the first response is the one carrying the
    /// session cookies. When a session cookie name is configured, a cookie
    /// with that name prefix must be present in the response or the login
    /// fails with [`Error::AuthRejected`] and the jar is left untouched. On
    /// success the entire jar is replaced with the response cookies and the
    /// credentials are remembered for [`TargetServer::relogin`].
    pub async fn login(&mut self, path: &str, form: Params) -> Result<()> {
        let request = self.request(Verb::Post, path, &form)?;
        let url = request.url.clone();

        let response = self.send(&self.login_client, request).await?;
        let tokens = response.tokens();

        if let Some(name) = self.config.required_cookie() {
            if !has_token(&tokens, name) {
                return Err(Error::auth_rejected(url.as_str(), name));
            }
        }

        tracing::info!(
            url = %url,
            status = %response.status,
            cookies = tokens.len(),
            "login succeeded, session cookies stored"
        );

        self.jar.replace_all(tokens);
        self.remembered = Some(LoginCredentials {
            path: path.to_string(),
            form,
        });
        Ok(())
    }

    /// Log in again with the credentials remembered from the last successful
    /// login. Fails with [`Error::NoCredentials`] if none are remembered;
    /// errors from the replayed login surface unchanged.
    pub async fn relogin(&mut self) -> Result<()> {
        let remembered = self.remembered.clone().ok_or(Error::NoCredentials)?;
        self.login(&remembered.path, remembered.form).await
    }

    /// Fetch a page as text.
    ///
    /// Issues a GET with `query` in the query string and the jar attached.
    /// Whatever the outcome, the connection counter advances and, on reaching
    /// a multiple of `connections_per_login`, a re-login runs before this
    /// returns. A re-login failure never discards a successfully fetched
    /// body; it is reported per the configured [`ReloginFailure`] policy.
    pub async fn fetch(&mut self, path: &str, query: Params) -> Result<Page> {
        let fetched = self.fetch_body(path, &query).await;
        let relogin_failure = self.after_fetch().await;

        match fetched {
            Ok(body) => {
                let relogin_failure = match (relogin_failure, self.config.relogin_failure) {
                    (Some(err), ReloginFailure::Surface) => Some(err),
                    (Some(err), ReloginFailure::LogOnly) => {
                        tracing::warn!(error = %err, "automatic relogin failed");
                        None
                    }
                    (None, _) => None,
                };
                Ok(Page {
                    body,
                    relogin_failure,
                })
            }
            Err(fetch_err) => {
                if let Some(err) = relogin_failure {
                    tracing::warn!(error = %err, "automatic relogin failed after a failed fetch");
                }
                Err(fetch_err)
            }
        }
    }

    /// Build a request against this context: host, agent name and jar applied
    pub fn request(&self, verb: Verb, path: &str, params: &Params) -> Result<Request> {
        Request::build(
            verb,
            &self.host,
            path,
            params,
            self.config.agent_name.as_deref(),
            &self.jar,
        )
    }

    async fn fetch_body(&self, path: &str, query: &Params) -> Result<String> {
        let request = self.request(Verb::Get, path, query)?;
        let response = self.send(&self.client, request).await?;
        Ok(response.text_lossy())
    }

    /// Advance the connection counter and re-login on the threshold
    async fn after_fetch(&mut self) -> Option<Error> {
        self.num_connections += 1;

        let per_login = self.config.connections_per_login;
        if per_login > 0 && self.num_connections % per_login == 0 {
            tracing::info!(
                connections = self.num_connections,
                per_login,
                "connection threshold reached, logging in again"
            );
            if let Err(err) = self.relogin().await {
                return Some(err);
            }
        }
        None
    }

    async fn send(&self, client: &Client, request: Request) -> Result<Response> {
        let mut builder = client.request(request.verb.as_method(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::body_read(url.as_str(), e))?;

        Ok(Response::new(status, headers, body, url))
    }
}
