// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the limpet scraping client
//!
//! Provides request construction under the two form-encoding conventions
//! (query string for GET/HEAD, body for POST/PUT), an insertion-ordered
//! session cookie jar, and an owned response type.

mod cookie;
mod request;
mod response;

pub use cookie::{has_token, Cookie, SessionJar};
pub use request::{ParamEncoding, Params, Request, Verb};
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("limpet/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const LOCATION: &str = "location";
}

/// Content type for form-encoded request bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
