// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! A reqwest-backed client that runs its interceptor chain around every
//! request, plus the request and response types interceptors operate on.

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig, RequestBuilder};
pub use request::Request;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("tokenwarden/", env!("CARGO_PKG_VERSION"));
