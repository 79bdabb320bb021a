// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! tokenwarden CLI
//!
//! Fetches a URL through an authenticated client. The access token is read
//! from `TOKENWARDEN_ACCESS_TOKEN`.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokenwarden::{
    mount, AttachmentController, AuthPipeline, HookSet, HttpClient, SessionTokenProvider,
};

const TOKEN_ENV: &str = "TOKENWARDEN_ACCESS_TOKEN";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tokenwarden=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: tokenwarden fetch <url>");
                return ExitCode::from(1);
            }
            fetch_url(&args[2]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("tokenwarden {}", tokenwarden::VERSION);
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
        r#"tokenwarden - Authentication-aware HTTP client

USAGE:
    tokenwarden <COMMAND>

COMMANDS:
    fetch <url>     Fetch a URL with the bearer token attached
    help            Show this help message
    version         Show version information

ENVIRONMENT:
    {}    Access token to attach (unset = no session)
    RUST_LOG                    Log filter (default: tokenwarden=info)

EXAMPLES:
    TOKENWARDEN_ACCESS_TOKEN=abc123 tokenwarden fetch https://api.example.com/me
"#,
        TOKEN_ENV
    );
}

async fn fetch_url(url: &str) -> ExitCode {
    let client = match HttpClient::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    let session = match env::var(TOKEN_ENV) {
        Ok(token) if !token.is_empty() => SessionTokenProvider::new(token),
        _ => SessionTokenProvider::empty(),
    }
    .on_logout(Arc::new(|| {
        eprintln!("Session ended; sign in again and export a fresh {}", TOKEN_ENV);
    }));

    let hooks = HookSet::new().on_response(|response| {
        tracing::info!(
            status = response.status_code(),
            time_ms = response.response_time_ms,
            "Response"
        );
        Ok(response)
    });
    let controller = AttachmentController::new(
        client.clone(),
        AuthPipeline::with_hooks(Arc::new(session), hooks),
    );
    let client = mount(&controller, client);

    println!("Fetching: {}", url);

    match client.get(url).await {
        Ok(response) => {
            println!("\n=== Response ===");
            println!("Status: {}", response.status);
            println!("URL: {}", response.url);
            println!("Content-Type: {:?}", response.content_type());
            println!("Size: {} bytes", response.body_len());
            println!("Time: {}ms", response.response_time_ms);
            println!("\n{}", response.text_lossy());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            if let Some(response) = e.response() {
                eprintln!("{}", response.text_lossy());
            }
            ExitCode::from(1)
        }
    }
}
