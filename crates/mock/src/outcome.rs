// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configured outcomes and how they turn into a deferred result.

use clientmock_client::{Client, SendFuture, SendResult, ServiceError};
use futures_util::future::{self, Future, Shared};
use futures_util::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Test-supplied function producing a reply from the call payload.
pub type FakeFn = Arc<dyn Fn(&Value, &Client) -> FakeReply + Send + Sync>;

/// What a fake function hands back.
pub enum FakeReply {
    /// A result available immediately.
    Ready(SendResult),
    /// A result produced later.
    Deferred(SendFuture),
}

impl FakeReply {
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = SendResult> + Send + 'static,
    {
        FakeReply::Deferred(future.boxed())
    }

    pub fn reject(error: impl Into<ServiceError>) -> Self {
        FakeReply::Ready(Err(error.into()))
    }
}

impl From<Value> for FakeReply {
    fn from(output: Value) -> Self {
        FakeReply::Ready(Ok(Some(output)))
    }
}

impl From<Option<Value>> for FakeReply {
    fn from(output: Option<Value>) -> Self {
        FakeReply::Ready(Ok(output))
    }
}

impl From<()> for FakeReply {
    fn from(_: ()) -> Self {
        FakeReply::Ready(Ok(None))
    }
}

impl From<SendResult> for FakeReply {
    fn from(result: SendResult) -> Self {
        FakeReply::Ready(result)
    }
}

impl From<Result<Value, ServiceError>> for FakeReply {
    fn from(result: Result<Value, ServiceError>) -> Self {
        FakeReply::Ready(result.map(Some))
    }
}

impl From<SendFuture> for FakeReply {
    fn from(future: SendFuture) -> Self {
        FakeReply::Deferred(future)
    }
}

pub(crate) fn fake_fn<F, R>(f: F) -> FakeFn
where
    F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
    R: Into<FakeReply>,
{
    Arc::new(move |input, client| f(input, client).into())
}

/// What a rule produces when selected.
#[derive(Clone)]
pub(crate) enum Outcome {
    Resolve(Option<Value>),
    Reject(ServiceError),
    Invoke(FakeFn),
    /// A deferred result awaited by every call the rule answers.
    Await(Shared<SendFuture>),
}

impl Outcome {
    pub(crate) fn awaiting<F>(future: F) -> Self
    where
        F: Future<Output = SendResult> + Send + 'static,
    {
        Outcome::Await(guarded(future.boxed()).shared())
    }

    /// Turn the outcome into the deferred result handed to the caller.
    ///
    /// Fakes run synchronously here. A panic, whether raised immediately or
    /// while the deferred reply is polled, becomes a rejection.
    pub(crate) fn materialize(self, input: &Value, client: &Client) -> SendFuture {
        match self {
            Outcome::Resolve(output) => future::ready(Ok(output)).boxed(),
            Outcome::Reject(error) => future::ready(Err(error)).boxed(),
            Outcome::Invoke(fake) => {
                match panic::catch_unwind(AssertUnwindSafe(|| fake(input, client))) {
                    Ok(FakeReply::Ready(result)) => future::ready(result).boxed(),
                    Ok(FakeReply::Deferred(deferred)) => guarded(deferred),
                    Err(payload) => future::ready(Err(panic_error(payload))).boxed(),
                }
            }
            Outcome::Await(shared) => shared.boxed(),
        }
    }
}

/// Deferred result whose panic becomes a rejection.
fn guarded(deferred: SendFuture) -> SendFuture {
    AssertUnwindSafe(deferred)
        .catch_unwind()
        .map(|polled| polled.unwrap_or_else(|payload| Err(panic_error(payload))))
        .boxed()
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Resolve(output) => f.debug_tuple("Resolve").field(output).finish(),
            Outcome::Reject(error) => f.debug_tuple("Reject").field(error).finish(),
            Outcome::Invoke(_) => f.write_str("Invoke(..)"),
            Outcome::Await(_) => f.write_str("Await(..)"),
        }
    }
}

/// Error carried by a panicking fake.
///
/// `std::panic::panic_any` with a `ServiceError` or JSON value keeps its
/// fields; string payloads become the message.
fn panic_error(payload: Box<dyn Any + Send>) -> ServiceError {
    if let Some(error) = payload.downcast_ref::<ServiceError>() {
        error.clone()
    } else if let Some(value) = payload.downcast_ref::<Value>() {
        ServiceError::from(value.clone())
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        ServiceError::new(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        ServiceError::new(message.clone())
    } else {
        ServiceError::new("fake function panicked")
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
