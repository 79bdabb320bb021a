// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authentication policy layered around caller hooks
//!
//! - Request: attach `Authorization: Bearer <token>` after the caller's
//!   request hook has run. With no token the session is logged out and the
//!   request is sent as-is, so the caller still sees the server's answer.
//! - Response error: a 401 logs the session out before the caller's
//!   response-error hook decides what the caller observes.
//!
//! The two remaining directions delegate straight to the caller's hooks.

use std::sync::Arc;

use futures::FutureExt;
use reqwest::header::{HeaderValue, AUTHORIZATION};

use super::hooks::{
    HookSet, Outcome, RequestErrorHook, RequestHook, ResponseErrorHook, ResponseHook,
};
use crate::auth::{LogoutReason, TokenProvider};
use crate::error::Error;
use crate::http::{Request, Response};

/// Interceptor pipeline enforcing the session policy
pub struct AuthPipeline {
    provider: Arc<dyn TokenProvider>,
    hooks: HookSet,
}

impl AuthPipeline {
    /// Create a pipeline with default hooks
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self::with_hooks(provider, HookSet::default())
    }

    /// Create a pipeline with caller hooks
    pub fn with_hooks(provider: Arc<dyn TokenProvider>, hooks: HookSet) -> Self {
        Self { provider, hooks }
    }

    /// Request success path
    pub async fn handle_request(&self, request: Request) -> Outcome<Request> {
        let Some(token) = self.provider.access_token() else {
            self.logout(LogoutReason::MissingCredential, request.url_str());
            return Ok(request);
        };

        let mut request = (self.hooks.on_request)(request).await?;

        let mut value = HeaderValue::try_from(format!("Bearer {}", token)).map_err(|_| {
            Error::Authentication {
                reason: "access token is not a valid header value".to_string(),
                url: Some(request.url.to_string()),
                status: None,
            }
        })?;
        value.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, value);

        Ok(request)
    }

    /// Request error path
    pub async fn handle_request_error(&self, error: Error) -> Outcome<Request> {
        (self.hooks.on_request_error)(error).await
    }

    /// Response success path
    pub async fn handle_response(&self, response: Response) -> Outcome<Response> {
        (self.hooks.on_response)(response).await
    }

    /// Response error path
    pub async fn handle_response_error(&self, error: Error) -> Outcome<Response> {
        if error.is_unauthorized() {
            self.logout(LogoutReason::Unauthorized, error.url().unwrap_or_default());
        }
        (self.hooks.on_response_error)(error).await
    }

    fn logout(&self, reason: LogoutReason, url: &str) {
        tracing::warn!(%reason, url, "Ending session");
        self.provider.logout();
    }

    /// Request success path as a registrable handler
    pub fn request_handler(self: &Arc<Self>) -> RequestHook {
        let pipeline = Arc::clone(self);
        Arc::new(move |request| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.handle_request(request).await }.boxed()
        })
    }

    /// Request error path as a registrable handler
    pub fn request_error_handler(self: &Arc<Self>) -> RequestErrorHook {
        let pipeline = Arc::clone(self);
        Arc::new(move |error| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.handle_request_error(error).await }.boxed()
        })
    }

    /// Response success path as a registrable handler
    pub fn response_handler(self: &Arc<Self>) -> ResponseHook {
        let pipeline = Arc::clone(self);
        Arc::new(move |response| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.handle_response(response).await }.boxed()
        })
    }

    /// Response error path as a registrable handler
    pub fn response_error_handler(self: &Arc<Self>) -> ResponseErrorHook {
        let pipeline = Arc::clone(self);
        Arc::new(move |error| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.handle_response_error(error).await }.boxed()
        })
    }
}

impl std::fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthPipeline")
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
