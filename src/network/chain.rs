// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor registration and ordered execution
//!
//! Handlers are registered in pairs, one for the fulfilled outcome and one
//! for the rejected outcome of the previous step. The registry is
//! append-only: nothing here reads or removes another subsystem's handlers.

use std::sync::Arc;

use parking_lot::RwLock;

use super::hooks::{Outcome, RequestErrorHook, RequestHook, ResponseErrorHook, ResponseHook};
use crate::http::{Request, Response};

/// Registration point for request and response interceptors
pub trait InterceptorRegistry: Send + Sync {
    /// Append a request interceptor pair
    fn use_request(&self, on_fulfilled: RequestHook, on_rejected: RequestErrorHook);

    /// Append a response interceptor pair
    fn use_response(&self, on_fulfilled: ResponseHook, on_rejected: ResponseErrorHook);
}

impl<T: InterceptorRegistry + ?Sized> InterceptorRegistry for Arc<T> {
    fn use_request(&self, on_fulfilled: RequestHook, on_rejected: RequestErrorHook) {
        (**self).use_request(on_fulfilled, on_rejected)
    }

    fn use_response(&self, on_fulfilled: ResponseHook, on_rejected: ResponseErrorHook) {
        (**self).use_response(on_fulfilled, on_rejected)
    }
}

#[derive(Clone)]
struct RequestInterceptor {
    on_fulfilled: RequestHook,
    on_rejected: RequestErrorHook,
}

#[derive(Clone)]
struct ResponseInterceptor {
    on_fulfilled: ResponseHook,
    on_rejected: ResponseErrorHook,
}

/// Interceptor chain - runs registered pairs in registration order
#[derive(Default)]
pub struct InterceptorChain {
    request: RwLock<Vec<RequestInterceptor>>,
    response: RwLock<Vec<ResponseInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered request interceptors
    pub fn request_len(&self) -> usize {
        self.request.read().len()
    }

    /// Number of registered response interceptors
    pub fn response_len(&self) -> usize {
        self.response.read().len()
    }

    /// Process a request outcome through all request interceptors
    ///
    /// Runs in registration order, first registered first. Clients that run
    /// request interceptors last registered first behave differently here.
    ///
    /// `Ok` flows into the next fulfilled handler, `Err` into the next
    /// rejected handler, so a rejected handler may recover the request.
    pub async fn process_request(&self, mut outcome: Outcome<Request>) -> Outcome<Request> {
        // Snapshot so no lock is held across an await
        let interceptors = self.request.read().clone();
        for interceptor in interceptors {
            outcome = match outcome {
                Ok(request) => (interceptor.on_fulfilled)(request).await,
                Err(error) => (interceptor.on_rejected)(error).await,
            };
        }
        outcome
    }

    /// Process a response outcome through all response interceptors
    pub async fn process_response(&self, mut outcome: Outcome<Response>) -> Outcome<Response> {
        let interceptors = self.response.read().clone();
        for interceptor in interceptors {
            outcome = match outcome {
                Ok(response) => (interceptor.on_fulfilled)(response).await,
                Err(error) => (interceptor.on_rejected)(error).await,
            };
        }
        outcome
    }
}

impl InterceptorRegistry for InterceptorChain {
    fn use_request(&self, on_fulfilled: RequestHook, on_rejected: RequestErrorHook) {
        self.request.write().push(RequestInterceptor {
            on_fulfilled,
            on_rejected,
        });
    }

    fn use_response(&self, on_fulfilled: ResponseHook, on_rejected: ResponseErrorHook) {
        self.response.write().push(ResponseInterceptor {
            on_fulfilled,
            on_rejected,
        });
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("request", &self.request_len())
            .field("response", &self.response_len())
            .finish()
    }
}
