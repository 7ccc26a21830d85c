// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Limpet CLI - Session-Aware Scraping Client
//!
//! Example usage and demonstration of the limpet library.

use std::env;
use std::process::ExitCode;

use limpet::{Params, ScraperConfig, TargetServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("limpet=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 4 {
                eprintln!("Usage: limpet fetch <host> <path> [key=value]...");
                return ExitCode::from(1);
            }
            fetch_page(&args[2], &args[3], &args[4..]).await
        }
        "login-fetch" => {
            if args.len() < 5 {
                eprintln!(
                    "Usage: limpet login-fetch <host> <login-path> <page-path> [key=value]..."
                );
                return ExitCode::from(1);
            }
            login_fetch(&args[2], &args[3], &args[4], &args[5..]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("limpet {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Limpet - Session-Aware Scraping Client

USAGE:
    limpet <COMMAND> [OPTIONS]

COMMANDS:
    fetch <host> <path> [key=value]...
        Fetch a page anonymously; pairs become the query string

    login-fetch <host> <login-path> <page-path> [key=value]...
        Log in via form POST (pairs become the form body), then fetch a page
        with the session cookies attached

    help            Show this help message
    version         Show version information

ENVIRONMENT:
    LIMPET_SESSION_COOKIE   Session cookie name to require after login
    LIMPET_AGENT            User-Agent string to send

EXAMPLES:
    limpet fetch https://example.com /search q=widgets
    limpet login-fetch https://example.com /login.php /members/list.php \
        username=scraper password=hunter2
"#
    );
}

/// Parse trailing key=value arguments into request parameters
fn parse_pairs(args: &[String]) -> Result<Params, String> {
    let mut params = Params::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => params.append(key, value),
            None => return Err(format!("expected key=value, got '{}'", arg)),
        }
    }
    Ok(params)
}

fn config_from_env() -> ScraperConfig {
    let mut config = ScraperConfig::new();
    if let Ok(name) = env::var("LIMPET_SESSION_COOKIE") {
        config = config.session_cookie_name(name);
    }
    if let Ok(agent) = env::var("LIMPET_AGENT") {
        config = config.agent_name(agent);
    }
    config
}

async fn fetch_page(host: &str, path: &str, pairs: &[String]) -> ExitCode {
    let query = match parse_pairs(pairs) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Bad query parameter: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut target = match TargetServer::with_config(host, config_from_env()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to create session context: {}", e);
            return ExitCode::from(1);
        }
    };

    match target.fetch(path, query).await {
        Ok(page) => {
            println!("{}", page.body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch page: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn login_fetch(host: &str, login_path: &str, page_path: &str, pairs: &[String]) -> ExitCode {
    let form = match parse_pairs(pairs) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Bad form parameter: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut target = match TargetServer::with_config(host, config_from_env()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to create session context: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = target.login(login_path, form).await {
        eprintln!("Login failed: {}", e);
        return ExitCode::from(1);
    }

    println!("=== Session ===");
    println!("Host: {}", target.host());
    println!("Cookies: {}", target.jar().len());
    for cookie in target.jar().iter() {
        println!("  - {}", cookie.name);
    }

    match target.fetch(page_path, Params::new()).await {
        Ok(page) => {
            println!("\n=== Page ({} bytes) ===", page.body.len());
            println!("{}", page.body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch page: {}", e);
            ExitCode::from(1)
        }
    }
}
