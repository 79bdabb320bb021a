// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interception
//!
//! The auth pipeline, the hooks callers layer into it, and the registry it is
//! attached to.

mod attach;
mod chain;
mod hooks;
mod pipeline;

pub use attach::{mount, AttachmentController};
pub use chain::{InterceptorChain, InterceptorRegistry};
pub use hooks::{
    HookFuture, HookSet, Outcome, RequestErrorHook, RequestHook, ResponseErrorHook, ResponseHook,
};
pub use pipeline::AuthPipeline;
