// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scraper configuration

use std::time::Duration;

/// How a failed automatic re-login inside a fetch is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloginFailure {
    /// Attach the error to the fetch result; the fetched body is kept
    #[default]
    Surface,
    /// Log a warning and carry on
    LogOnly,
}

/// Configuration for a [`TargetServer`](super::TargetServer)
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Identification string sent as User-Agent on every request;
    /// None means the built-in default
    pub agent_name: Option<String>,
    /// Name prefix of the session cookie expected in a successful login
    /// response; None or empty skips validation and accepts any response
    pub session_cookie_name: Option<String>,
    /// Fetches between automatic re-logins; 0 disables them
    pub connections_per_login: u64,
    /// Request timeout, owned by the transport
    pub timeout: Duration,
    /// Reporting policy for a failed automatic re-login
    pub relogin_failure: ReloginFailure,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            agent_name: None,
            session_cookie_name: None,
            connections_per_login: 0,
            timeout: Duration::from_secs(30),
            relogin_failure: ReloginFailure::default(),
        }
    }
}

impl ScraperConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the agent name
    pub fn agent_name(mut self, agent_name: impl Into<String>) -> Self {
        self.agent_name = Some(agent_name.into());
        self
    }

    /// Set the expected session cookie name prefix
    pub fn session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = Some(name.into());
        self
    }

    /// Set the number of fetches between automatic re-logins
    pub fn connections_per_login(mut self, connections: u64) -> Self {
        self.connections_per_login = connections;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the relogin failure policy
    pub fn relogin_failure(mut self, policy: ReloginFailure) -> Self {
        self.relogin_failure = policy;
        self
    }

    /// Session cookie name to validate against, if one is configured
    pub fn required_cookie(&self) -> Option<&str> {
        self.session_cookie_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_config() {
        let config = ScraperConfig::new()
            .agent_name("NightCrawler/2.1")
            .session_cookie_name("PHPSESSID")
            .connections_per_login(50)
            .timeout(Duration::from_secs(10));

        assert_eq!(config.agent_name.as_deref(), Some("NightCrawler/2.1"));
        assert_eq!(config.required_cookie(), Some("PHPSESSID"));
        assert_eq!(config.connections_per_login, 50);
        assert_eq!(config.relogin_failure, ReloginFailure::Surface);
    }

    #[test]
    fn test_defaults_disable_relogin_and_validation() {
        let config = ScraperConfig::default();

        assert_eq!(config.connections_per_login, 0);
        assert_eq!(config.required_cookie(), None);
    }

    #[test]
    fn test_empty_cookie_name_means_no_validation() {
        let config = ScraperConfig::new().session_cookie_name("");
        assert_eq!(config.required_cookie(), None);
    }
}
