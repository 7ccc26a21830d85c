// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Limpet - Session-Aware Scraping Client
//!
//! A small HTTP client for scraping sites that sit behind an HTML form login.
//! It logs in, clings to the session cookies the server hands back, and
//! re-plays the login on a fixed cadence so long scraping runs stay
//! authenticated.
//!
//! ## Features
//!
//! - Form login with validation: the login only counts if the response
//!   carries the expected session cookie
//! - Owned, insertion-ordered cookie jar with prefix lookup for servers that
//!   suffix their session cookie names
//! - Automatic re-login every N fetches, using the remembered credentials
//! - Login redirects suppressed: the post-login 302 is read, not followed,
//!   so the session cookie is never lost
//! - Two encoding conventions, chosen by verb: query string for GET/HEAD,
//!   form-encoded body for POST/PUT
//!
//! ## Example
//!
//! ```rust,no_run
//! use limpet::{Params, ScraperConfig, TargetServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScraperConfig::new()
//!         .session_cookie_name("PHPSESSID")
//!         .connections_per_login(100);
//!     let mut target = TargetServer::with_config("https://example.com", config)?;
//!
//!     let form = Params::new()
//!         .with("username", "scraper")
//!         .with("password", "hunter2");
//!     target.login("/login.php", form).await?;
//!
//!     let page = target.fetch("/members/list.php", Params::new()).await?;
//!     println!("{}", page.body);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod scraper;

// Re-exports for convenience

// Session context
pub use scraper::{Page, ReloginFailure, ScraperConfig, TargetServer};

// HTTP layer
pub use http::{Cookie, Params, Request, Response, SessionJar, Verb};

// Errors
pub use error::{Error, Result};

/// Limpet version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
