// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mock binding: replaces a client's `send` with configurable behavior.

use crate::error::{command_operation, parse_operation, MockError};
use crate::interceptor::{StubHandler, StubState};
use crate::matcher::InputFilter;
use crate::options::MockOptions;
use crate::outcome::{fake_fn, FakeReply, Outcome};
use crate::rules::{RuleId, RuleRegistry, Scope};
use clientmock_capture::{CallLedger, CallRecord};
use clientmock_client::{
    Client, Command, InstallToken, MethodSlot, MockTarget, OperationId, SendResult, ServiceError,
};
use futures_util::future::Future;
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Mock `target`'s `send` method.
///
/// Passing a [`ClientClass`](clientmock_client::ClientClass) intercepts every
/// instance of the class; passing a [`Client`] intercepts that instance only.
/// An existing mock or spy on the same slot is torn down first.
///
/// Options come from the environment (see [`MockOptions::from_env`]). A
/// capture file that cannot be opened is logged and capture is skipped; use
/// [`mock_client_with`] to get the error instead.
pub fn mock_client<T: MockTarget + ?Sized>(target: &T) -> ClientMock {
    let ledger = MockOptions::from_env().ledger().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "call capture disabled");
        CallLedger::new()
    });
    ClientMock::install(target, ledger)
}

/// Mock `target`'s `send` method with explicit options.
pub fn mock_client_with<T: MockTarget + ?Sized>(
    target: &T,
    options: MockOptions,
) -> Result<ClientMock, MockError> {
    Ok(ClientMock::install(target, options.ledger()?))
}

struct Installed {
    token: InstallToken,
    state: Arc<StubState>,
}

/// A client whose `send` answers from configured rules.
///
/// Calls with no matching rule resolve to `None`.
pub struct ClientMock {
    name: String,
    slot: Arc<MethodSlot>,
    installed: RwLock<Installed>,
}

fn install(slot: &MethodSlot, state: Arc<StubState>) -> InstallToken {
    slot.intercept(move |_original| Arc::new(StubHandler::new(state)))
}

impl ClientMock {
    fn install<T: MockTarget + ?Sized>(target: &T, ledger: CallLedger) -> Self {
        let name = target.client_name();
        let slot = target.send_slot();
        let state = Arc::new(StubState::new(ledger));
        let token = install(&slot, Arc::clone(&state));
        tracing::debug!(client = %name, "installed mock");
        Self {
            name,
            slot,
            installed: RwLock::new(Installed { token, state }),
        }
    }

    fn state(&self) -> Arc<StubState> {
        Arc::clone(&self.installed.read().state)
    }

    fn register(&self, scope: Scope) -> Behavior<'_> {
        let rule = self.state().with_registry(|registry| registry.register(scope));
        Behavior { mock: self, rule }
    }

    fn client_behavior(&self) -> Behavior<'_> {
        let rule = self.state().with_registry(RuleRegistry::client_default);
        Behavior { mock: self, rule }
    }

    fn configure(&self, rule: RuleId, f: impl FnOnce(&mut RuleRegistry) -> bool) {
        if !self.state().with_registry(f) {
            tracing::warn!(client = %self.name, ?rule, "rule was discarded by reset; ignoring");
        }
    }

    /// Behavior for every call of command `C`.
    ///
    /// Fails if `C::OPERATION` is not a valid operation name.
    pub fn on<C: Command>(&self) -> Result<Behavior<'_>, MockError> {
        let operation = command_operation::<C>()?;
        Ok(self.register(Scope::operation(operation, None)))
    }

    /// Behavior for calls of command `C` whose input satisfies `filter`.
    pub fn on_input<C: Command>(
        &self,
        filter: impl Into<InputFilter>,
    ) -> Result<Behavior<'_>, MockError> {
        let operation = command_operation::<C>()?;
        Ok(self.register(Scope::operation(operation, Some(filter.into()))))
    }

    /// Behavior for an operation named at runtime.
    pub fn on_operation(
        &self,
        name: &str,
        filter: Option<InputFilter>,
    ) -> Result<Behavior<'_>, MockError> {
        let operation = parse_operation(name)?;
        Ok(self.register(Scope::operation(operation, filter)))
    }

    /// Behavior for every call.
    pub fn on_any_command(&self) -> Behavior<'_> {
        self.register(Scope::any(None))
    }

    /// Behavior for calls of any operation whose input satisfies `filter`.
    pub fn on_any_command_input(&self, filter: impl Into<InputFilter>) -> Behavior<'_> {
        self.register(Scope::any(Some(filter.into())))
    }

    pub fn resolves(&self, output: Value) -> &Self {
        self.client_behavior().resolves(output)
    }

    pub fn resolves_once(&self, output: Value) -> Behavior<'_> {
        self.client_behavior().resolves_once(output)
    }

    pub fn rejects(&self, error: impl Into<ServiceError>) -> &Self {
        self.client_behavior().rejects(error)
    }

    pub fn rejects_once(&self, error: impl Into<ServiceError>) -> Behavior<'_> {
        self.client_behavior().rejects_once(error)
    }

    /// Answer every call with the result of `future`.
    pub fn resolves_with<F>(&self, future: F) -> &Self
    where
        F: Future<Output = SendResult> + Send + 'static,
    {
        self.client_behavior().resolves_with(future)
    }

    pub fn resolves_with_once<F>(&self, future: F) -> Behavior<'_>
    where
        F: Future<Output = SendResult> + Send + 'static,
    {
        self.client_behavior().resolves_with_once(future)
    }

    pub fn calls_fake<F, R>(&self, f: F) -> &Self
    where
        F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
        R: Into<FakeReply>,
    {
        self.client_behavior().calls_fake(f)
    }

    pub fn calls_fake_once<F, R>(&self, f: F) -> Behavior<'_>
    where
        F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
        R: Into<FakeReply>,
    {
        self.client_behavior().calls_fake_once(f)
    }

    /// Start over: no rules, no calls, freshly installed interceptor.
    ///
    /// Re-intercepts the target even after [`ClientMock::restore`].
    /// Behaviors obtained before the reset no longer configure anything.
    pub fn reset(&self) -> &Self {
        let mut installed = self.installed.write();
        let state = Arc::new(StubState::new(installed.state.ledger().renewed()));
        installed.token = install(&self.slot, Arc::clone(&state));
        installed.state = state;
        tracing::debug!(client = %self.name, "reset mock");
        self
    }

    /// Forget recorded calls; rules are kept.
    pub fn reset_history(&self) -> &Self {
        self.state().ledger().clear();
        tracing::debug!(client = %self.name, "reset mock history");
        self
    }

    /// Put the original `send` back.
    ///
    /// Does nothing if another mock or spy has since replaced this one.
    pub fn restore(&self) {
        let token = self.installed.read().token;
        if self.slot.restore(token) {
            tracing::debug!(client = %self.name, "restored original send");
        } else {
            tracing::warn!(client = %self.name, "mock is no longer installed; restore ignored");
        }
    }

    /// Whether this mock no longer intercepts its target.
    pub fn is_restored(&self) -> bool {
        !self.slot.is_active(self.installed.read().token)
    }

    /// Every intercepted call, in invocation order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state().ledger().all()
    }

    /// The n-th intercepted call (0-indexed).
    pub fn call(&self, n: usize) -> Option<CallRecord> {
        self.state().ledger().nth(n)
    }

    /// Calls of command `C`, optionally narrowed by an input filter.
    ///
    /// Empty when `C::OPERATION` is invalid, since such a command cannot be
    /// sent.
    pub fn command_calls<C: Command>(&self, filter: Option<InputFilter>) -> Vec<CallRecord> {
        match OperationId::of::<C>() {
            Ok(operation) => self.operation_calls(&operation, filter.as_ref()),
            Err(_) => Vec::new(),
        }
    }

    /// Calls of `operation`, optionally narrowed by an input filter.
    pub fn operation_calls(
        &self,
        operation: &OperationId,
        filter: Option<&InputFilter>,
    ) -> Vec<CallRecord> {
        filtered_calls(self.state().ledger(), operation, filter)
    }

    /// Name of the mocked client class.
    pub fn client_name(&self) -> &str {
        &self.name
    }
}

pub(crate) fn filtered_calls(
    ledger: &CallLedger,
    operation: &OperationId,
    filter: Option<&InputFilter>,
) -> Vec<CallRecord> {
    ledger.filter(|record| {
        record.operation() == operation && crate::matcher::matches(record.input(), filter)
    })
}

impl fmt::Debug for ClientMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed = self.installed.read();
        f.debug_struct("ClientMock")
            .field("client", &self.name)
            .field("token", &installed.token)
            .field("rules", &installed.state.with_registry(|r| r.len()))
            .field("calls", &installed.state.ledger().len())
            .finish()
    }
}

/// Handle to one rule of a [`ClientMock`].
///
/// `resolves`, `rejects` and `calls_fake` set the rule's default outcome and
/// hand back the mock. The `*_once` variants queue an outcome for the rule's
/// next unconfigured match and keep the handle for further chaining.
#[derive(Clone)]
pub struct Behavior<'a> {
    mock: &'a ClientMock,
    rule: RuleId,
}

impl<'a> Behavior<'a> {
    fn set_default(self, outcome: Outcome) -> &'a ClientMock {
        let rule = self.rule;
        self.mock
            .configure(rule, |registry| registry.set_default(rule, outcome));
        self.mock
    }

    fn push_once(self, outcome: Outcome) -> Self {
        let rule = self.rule;
        self.mock
            .configure(rule, |registry| registry.push_once(rule, outcome));
        self
    }

    pub fn resolves(self, output: Value) -> &'a ClientMock {
        self.set_default(Outcome::Resolve(Some(output)))
    }

    pub fn resolves_once(self, output: Value) -> Self {
        self.push_once(Outcome::Resolve(Some(output)))
    }

    pub fn rejects(self, error: impl Into<ServiceError>) -> &'a ClientMock {
        self.set_default(Outcome::Reject(error.into()))
    }

    pub fn rejects_once(self, error: impl Into<ServiceError>) -> Self {
        self.push_once(Outcome::Reject(error.into()))
    }

    /// Answer with the result of `future`.
    ///
    /// The future runs once; every call the rule answers receives a clone
    /// of its result.
    pub fn resolves_with<F>(self, future: F) -> &'a ClientMock
    where
        F: Future<Output = SendResult> + Send + 'static,
    {
        self.set_default(Outcome::awaiting(future))
    }

    pub fn resolves_with_once<F>(self, future: F) -> Self
    where
        F: Future<Output = SendResult> + Send + 'static,
    {
        self.push_once(Outcome::awaiting(future))
    }

    /// Answer with `f(input, client)`.
    pub fn calls_fake<F, R>(self, f: F) -> &'a ClientMock
    where
        F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
        R: Into<FakeReply>,
    {
        self.set_default(Outcome::Invoke(fake_fn(f)))
    }

    pub fn calls_fake_once<F, R>(self, f: F) -> Self
    where
        F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
        R: Into<FakeReply>,
    {
        self.push_once(Outcome::Invoke(fake_fn(f)))
    }

    pub fn on<C: Command>(&self) -> Result<Behavior<'a>, MockError> {
        self.mock.on::<C>()
    }

    pub fn on_input<C: Command>(
        &self,
        filter: impl Into<InputFilter>,
    ) -> Result<Behavior<'a>, MockError> {
        self.mock.on_input::<C>(filter)
    }

    pub fn on_operation(
        &self,
        name: &str,
        filter: Option<InputFilter>,
    ) -> Result<Behavior<'a>, MockError> {
        self.mock.on_operation(name, filter)
    }

    pub fn on_any_command(&self) -> Behavior<'a> {
        self.mock.on_any_command()
    }

    pub fn on_any_command_input(&self, filter: impl Into<InputFilter>) -> Behavior<'a> {
        self.mock.on_any_command_input(filter)
    }
}

impl fmt::Debug for Behavior<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("client", &self.mock.name)
            .field("rule", &self.rule)
            .finish()
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
