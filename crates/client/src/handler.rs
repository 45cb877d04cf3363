// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The replaceable `send` method.

use crate::client::Client;
use crate::error::ServiceError;
use crate::operation::Request;
use futures_util::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Settled result of a send: an output value (or nothing) or a service error.
pub type SendResult = Result<Option<Value>, ServiceError>;

/// Deferred result of a send.
pub type SendFuture = BoxFuture<'static, SendResult>;

/// Implementation of a client's `send` method.
///
/// Implementations must return promptly; any real work happens inside the
/// returned future. Interceptors rely on this to record calls in invocation
/// order.
pub trait SendHandler: Send + Sync {
    /// Handle one request issued through `client`.
    fn send(&self, client: &Client, request: Request) -> SendFuture;
}

struct FnHandler<F>(F);

impl<F> SendHandler for FnHandler<F>
where
    F: Fn(&Client, Request) -> SendFuture + Send + Sync,
{
    fn send(&self, client: &Client, request: Request) -> SendFuture {
        (self.0)(client, request)
    }
}

/// Wrap a closure as a [`SendHandler`].
pub fn handler_fn<F>(f: F) -> Arc<dyn SendHandler>
where
    F: Fn(&Client, Request) -> SendFuture + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}
