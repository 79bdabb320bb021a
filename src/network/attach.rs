// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Binding the auth pipeline to a client's interceptor registry

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::chain::InterceptorRegistry;
use super::pipeline::AuthPipeline;

/// Registers an [`AuthPipeline`] on an interceptor registry
///
/// Callers activate each controller once. A second `activate` registers the
/// handlers a second time, so every request would be intercepted twice; it is
/// logged but not prevented. There is no way to detach.
pub struct AttachmentController<R: InterceptorRegistry + ?Sized> {
    registry: Arc<R>,
    pipeline: Arc<AuthPipeline>,
    activations: AtomicUsize,
}

impl<R: InterceptorRegistry + ?Sized> AttachmentController<R> {
    /// Create a controller for `pipeline` on `registry`
    pub fn new(registry: Arc<R>, pipeline: AuthPipeline) -> Self {
        Self {
            registry,
            pipeline: Arc::new(pipeline),
            activations: AtomicUsize::new(0),
        }
    }

    /// Register the four pipeline handlers
    pub fn activate(&self) {
        let previous = self.activations.fetch_add(1, Ordering::SeqCst);
        if previous > 0 {
            tracing::warn!(
                activations = previous + 1,
                "Auth interceptors attached again; requests will be intercepted more than once"
            );
        }

        self.registry.use_request(
            self.pipeline.request_handler(),
            self.pipeline.request_error_handler(),
        );
        self.registry.use_response(
            self.pipeline.response_handler(),
            self.pipeline.response_error_handler(),
        );

        tracing::debug!("Auth interceptors attached");
    }

    /// Number of times `activate` has run
    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    /// The pipeline this controller registers
    pub fn pipeline(&self) -> &Arc<AuthPipeline> {
        &self.pipeline
    }
}

/// Activate `controller` and hand `children` back unchanged
///
/// Host integrations call this once when they become active; whatever they
/// wrap is only released after the interceptors are in place.
pub fn mount<R, T>(controller: &AttachmentController<R>, children: T) -> T
where
    R: InterceptorRegistry + ?Sized,
{
    controller.activate();
    children
}
