// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session credentials
//!
//! The interceptor pipeline only ever asks two things of a session: the
//! current access token, and to end the session.

mod provider;

pub use provider::{LogoutCallback, LogoutReason, SessionTokenProvider, TokenProvider};
