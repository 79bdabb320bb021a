// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Caller-supplied interceptor hooks
//!
//! A [`HookSet`] has four slots, one per interceptor direction and outcome.
//! Unset slots resolve to their defaults when the set is built:
//!
//! | slot                | default                   |
//! |---------------------|---------------------------|
//! | `on_request`        | pass the request through  |
//! | `on_request_error`  | reject with the same error|
//! | `on_response`       | pass the response through |
//! | `on_response_error` | reject with the same error|
//!
//! Every hook returns a [`HookFuture`], so synchronous and asynchronous hooks
//! share one shape. The `*_async` setters accept closures that already
//! return futures.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use super::chain::InterceptorRegistry;
use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// Success value or failure value of an interceptor step
pub type Outcome<T> = Result<T>;

/// Deferred outcome returned by every hook
pub type HookFuture<T> = BoxFuture<'static, Outcome<T>>;

/// Hook run on an outgoing request
pub type RequestHook = Arc<dyn Fn(Request) -> HookFuture<Request> + Send + Sync>;

/// Hook run on a request-side failure
pub type RequestErrorHook = Arc<dyn Fn(Error) -> HookFuture<Request> + Send + Sync>;

/// Hook run on a successful response
pub type ResponseHook = Arc<dyn Fn(Response) -> HookFuture<Response> + Send + Sync>;

/// Hook run on a response-side failure
pub type ResponseErrorHook = Arc<dyn Fn(Error) -> HookFuture<Response> + Send + Sync>;

/// The four hook slots consulted by the auth pipeline
#[derive(Clone)]
pub struct HookSet {
    pub(crate) on_request: RequestHook,
    pub(crate) on_request_error: RequestErrorHook,
    pub(crate) on_response: ResponseHook,
    pub(crate) on_response_error: ResponseErrorHook,
}

impl Default for HookSet {
    fn default() -> Self {
        Self {
            on_request: Arc::new(pass_through::<Request>),
            on_request_error: Arc::new(reject::<Request>),
            on_response: Arc::new(pass_through::<Response>),
            on_response_error: Arc::new(reject::<Response>),
        }
    }
}

fn pass_through<T: Send + 'static>(value: T) -> HookFuture<T> {
    future::ok(value).boxed()
}

fn reject<T: Send + 'static>(error: Error) -> HookFuture<T> {
    future::err(error).boxed()
}

impl HookSet {
    /// Create a hook set with every slot at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request hook
    pub fn on_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(Request) -> Outcome<Request> + Send + Sync + 'static,
    {
        self.on_request = Arc::new(move |request| future::ready(hook(request)).boxed());
        self
    }

    /// Set asynchronous request hook
    pub fn on_request_async<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<Request>> + Send + 'static,
    {
        self.on_request = Arc::new(move |request| hook(request).boxed());
        self
    }

    /// Set request error hook
    pub fn on_request_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(Error) -> Outcome<Request> + Send + Sync + 'static,
    {
        self.on_request_error = Arc::new(move |error| future::ready(hook(error)).boxed());
        self
    }

    /// Set asynchronous request error hook
    pub fn on_request_error_async<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Error) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<Request>> + Send + 'static,
    {
        self.on_request_error = Arc::new(move |error| hook(error).boxed());
        self
    }

    /// Set response hook
    pub fn on_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(Response) -> Outcome<Response> + Send + Sync + 'static,
    {
        self.on_response = Arc::new(move |response| future::ready(hook(response)).boxed());
        self
    }

    /// Set asynchronous response hook
    pub fn on_response_async<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<Response>> + Send + 'static,
    {
        self.on_response = Arc::new(move |response| hook(response).boxed());
        self
    }

    /// Set response error hook
    pub fn on_response_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(Error) -> Outcome<Response> + Send + Sync + 'static,
    {
        self.on_response_error = Arc::new(move |error| future::ready(hook(error)).boxed());
        self
    }

    /// Set asynchronous response error hook
    pub fn on_response_error_async<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Error) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<Response>> + Send + 'static,
    {
        self.on_response_error = Arc::new(move |error| hook(error).boxed());
        self
    }

    /// Register these hooks as plain interceptors, without any auth policy
    pub fn attach_to<R: InterceptorRegistry + ?Sized>(&self, registry: &R) {
        registry.use_request(self.on_request.clone(), self.on_request_error.clone());
        registry.use_response(self.on_response.clone(), self.on_response_error.clone());
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet").finish_non_exhaustive()
    }
}
