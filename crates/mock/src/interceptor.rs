// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers installed in place of a client's `send`.

use crate::outcome::Outcome;
use crate::rules::{RuleId, RuleRegistry};
use clientmock_capture::{CallLedger, CallOutcome, CallRecord};
use clientmock_client::{Client, Request, SendFuture, SendHandler, ServiceError};
use futures_util::future;
use futures_util::FutureExt;
use parking_lot::Mutex;
use std::sync::Arc;

/// Ledger and rules of one mock binding.
pub(crate) struct StubState {
    ledger: CallLedger,
    registry: Mutex<RuleRegistry>,
}

impl StubState {
    pub(crate) fn new(ledger: CallLedger) -> Self {
        Self {
            ledger,
            registry: Mutex::new(RuleRegistry::default()),
        }
    }

    pub(crate) fn ledger(&self) -> &CallLedger {
        &self.ledger
    }

    /// Run `f` against the registry.
    pub(crate) fn with_registry<R>(&self, f: impl FnOnce(&mut RuleRegistry) -> R) -> R {
        f(&mut self.registry.lock())
    }

    /// Record a call and pick its outcome.
    ///
    /// Both steps happen under the registry lock, so ledger order and
    /// once-queue consumption agree.
    fn intercept(&self, request: Request) -> (CallRecord, Outcome, Option<RuleId>) {
        let mut registry = self.registry.lock();
        let record = self.ledger.append(request);
        let resolution = registry.resolve(record.request());
        (record, resolution.outcome, resolution.rule)
    }
}

/// Answers calls from the binding's rules.
pub(crate) struct StubHandler {
    state: Arc<StubState>,
}

impl StubHandler {
    pub(crate) fn new(state: Arc<StubState>) -> Self {
        Self { state }
    }
}

impl SendHandler for StubHandler {
    fn send(&self, client: &Client, request: Request) -> SendFuture {
        let (record, outcome, rule) = self.state.intercept(request);
        tracing::debug!(
            seq = record.seq(),
            operation = %record.operation(),
            ?rule,
            "intercepted call"
        );
        let deferred = outcome.materialize(record.input(), client);
        settle_into(self.state.ledger.clone(), record, deferred)
    }
}

/// Records calls and forwards them to the original `send`.
pub(crate) struct SpyHandler {
    ledger: CallLedger,
    original: Option<Arc<dyn SendHandler>>,
}

impl SpyHandler {
    pub(crate) fn new(ledger: CallLedger, original: Option<Arc<dyn SendHandler>>) -> Self {
        Self { ledger, original }
    }

    /// The handler to delegate to. An instance without its own `send`
    /// falls through to its class.
    fn delegate(&self, client: &Client) -> Option<Arc<dyn SendHandler>> {
        self.original
            .clone()
            .or_else(|| client.class().slot().current())
            .filter(|handler| !std::ptr::addr_eq(Arc::as_ptr(handler), self as *const Self))
    }
}

impl SendHandler for SpyHandler {
    fn send(&self, client: &Client, request: Request) -> SendFuture {
        let record = self.ledger.append(request.clone());
        let deferred = match self.delegate(client) {
            Some(handler) => handler.send(client, request),
            None => {
                let error = ServiceError::new(format!(
                    "{} has no send implementation for {}",
                    client.class().name(),
                    request.operation
                ))
                .with_name("NoHandler");
                future::ready(Err(error)).boxed()
            }
        };
        settle_into(self.ledger.clone(), record, deferred)
    }
}

/// Store the result on the record once `deferred` settles.
fn settle_into(ledger: CallLedger, record: CallRecord, deferred: SendFuture) -> SendFuture {
    async move {
        let result = deferred.await;
        ledger.settle(&record, CallOutcome::from(&result));
        result
    }
    .boxed()
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
