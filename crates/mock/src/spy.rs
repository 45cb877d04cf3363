// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spy binding: records calls while the original `send` keeps answering.

use crate::error::MockError;
use crate::interceptor::SpyHandler;
use crate::matcher::InputFilter;
use crate::mock::filtered_calls;
use crate::options::MockOptions;
use clientmock_capture::{CallLedger, CallRecord};
use clientmock_client::{Command, InstallToken, MethodSlot, MockTarget, OperationId};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Spy on `target`'s `send` method.
///
/// Every call is recorded with its settled outcome and then forwarded to
/// the original implementation. An existing mock or spy on the same slot is
/// torn down first.
pub fn spy_client<T: MockTarget + ?Sized>(target: &T) -> ClientSpy {
    let ledger = MockOptions::from_env().ledger().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "call capture disabled");
        CallLedger::new()
    });
    ClientSpy::install(target, ledger)
}

/// Spy on `target`'s `send` method with explicit options.
pub fn spy_client_with<T: MockTarget + ?Sized>(
    target: &T,
    options: MockOptions,
) -> Result<ClientSpy, MockError> {
    Ok(ClientSpy::install(target, options.ledger()?))
}

struct Installed {
    token: InstallToken,
    ledger: CallLedger,
}

/// A client whose calls are recorded but not altered.
pub struct ClientSpy {
    name: String,
    slot: Arc<MethodSlot>,
    installed: RwLock<Installed>,
}

fn install(slot: &MethodSlot, ledger: CallLedger) -> InstallToken {
    slot.intercept(move |original| Arc::new(SpyHandler::new(ledger, original)))
}

impl ClientSpy {
    fn install<T: MockTarget + ?Sized>(target: &T, ledger: CallLedger) -> Self {
        let name = target.client_name();
        let slot = target.send_slot();
        let token = install(&slot, ledger.clone());
        tracing::debug!(client = %name, "installed spy");
        Self {
            name,
            slot,
            installed: RwLock::new(Installed { token, ledger }),
        }
    }

    fn ledger(&self) -> CallLedger {
        self.installed.read().ledger.clone()
    }

    /// Replace the spy with a fresh one with empty history.
    pub fn reset(&self) -> &Self {
        let mut installed = self.installed.write();
        let ledger = installed.ledger.renewed();
        installed.token = install(&self.slot, ledger.clone());
        installed.ledger = ledger;
        tracing::debug!(client = %self.name, "reset spy");
        self
    }

    /// Forget recorded calls.
    pub fn reset_history(&self) -> &Self {
        self.ledger().clear();
        self
    }

    /// Put the original `send` back.
    pub fn restore(&self) {
        let token = self.installed.read().token;
        if self.slot.restore(token) {
            tracing::debug!(client = %self.name, "restored original send");
        } else {
            tracing::warn!(client = %self.name, "spy is no longer installed; restore ignored");
        }
    }

    pub fn is_restored(&self) -> bool {
        !self.slot.is_active(self.installed.read().token)
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.ledger().all()
    }

    pub fn call(&self, n: usize) -> Option<CallRecord> {
        self.ledger().nth(n)
    }

    pub fn command_calls<C: Command>(&self, filter: Option<InputFilter>) -> Vec<CallRecord> {
        match OperationId::of::<C>() {
            Ok(operation) => self.operation_calls(&operation, filter.as_ref()),
            Err(_) => Vec::new(),
        }
    }

    pub fn operation_calls(
        &self,
        operation: &OperationId,
        filter: Option<&InputFilter>,
    ) -> Vec<CallRecord> {
        filtered_calls(&self.ledger(), operation, filter)
    }

    pub fn client_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ClientSpy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed = self.installed.read();
        f.debug_struct("ClientSpy")
            .field("client", &self.name)
            .field("token", &installed.token)
            .field("calls", &installed.ledger.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "spy_tests.rs"]
mod tests;
