// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session-aware scraping client
//!
//! One [`TargetServer`] owns the whole lifecycle for one remote host: form
//! login, the session cookie jar, every subsequent fetch, and the
//! counter-driven automatic re-login that keeps long scraping runs alive.

mod config;
mod target;

pub use config::{ReloginFailure, ScraperConfig};
pub use target::{Page, TargetServer};
