// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # tokenwarden - Authentication-aware HTTP interception
//!
//! Attaches bearer credentials to outgoing requests and ends the session when
//! the server answers 401, so application code never handles access tokens
//! or "session expired" responses itself.
//!
//! ## Features
//!
//! - Bearer injection: `Authorization: Bearer <token>` on every request,
//!   applied after caller hooks so they cannot override it
//! - Fail-open on missing tokens: the session is logged out and the request
//!   still goes out, so the caller sees the server's answer
//! - Logout on 401: fired before caller error hooks, which only decide what
//!   the caller observes
//! - Four optional caller hooks, synchronous or asynchronous
//! - Append-only interceptor registry on a reqwest-backed client
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokenwarden::{AttachmentController, AuthPipeline, HookSet, HttpClient, SessionTokenProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(HttpClient::new()?);
//!     let session = SessionTokenProvider::new("access-token");
//!
//!     let hooks = HookSet::new().on_request(|req| Ok(req.header("x-client", "docs")));
//!     let pipeline = AuthPipeline::with_hooks(Arc::new(session), hooks);
//!     AttachmentController::new(client.clone(), pipeline).activate();
//!
//!     let response = client.get("https://api.example.com/me").await?;
//!     println!("{}", response.text_lossy());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod http;
pub mod network;

// Re-exports for convenience

// Session
pub use auth::{LogoutReason, SessionTokenProvider, TokenProvider};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, RequestBuilder, Response};

// Interception
pub use network::{
    mount, AttachmentController, AuthPipeline, HookFuture, HookSet, InterceptorChain,
    InterceptorRegistry, Outcome,
};

/// tokenwarden version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
