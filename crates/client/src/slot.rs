// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Method slot holding a replaceable `send` handler.

use crate::handler::SendHandler;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one installed interception of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstallToken(u64);

impl InstallToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

struct Interception {
    token: InstallToken,
    original: Option<Arc<dyn SendHandler>>,
}

#[derive(Default)]
struct SlotState {
    handler: Option<Arc<dyn SendHandler>>,
    interception: Option<Interception>,
}

/// A single replaceable method.
///
/// At most one interception is active at a time. Installing a new one
/// first restores the original, so interceptors never wrap each other.
#[derive(Default)]
pub struct MethodSlot {
    state: RwLock<SlotState>,
}

impl MethodSlot {
    /// Slot with no handler of its own.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Slot holding `handler` as its original method.
    pub fn with_handler(handler: Arc<dyn SendHandler>) -> Self {
        Self {
            state: RwLock::new(SlotState {
                handler: Some(handler),
                interception: None,
            }),
        }
    }

    /// Handler currently installed, if any.
    pub fn current(&self) -> Option<Arc<dyn SendHandler>> {
        self.state.read().handler.clone()
    }

    /// Handler that was in place before the active interception, or the
    /// current handler when nothing is intercepted.
    pub fn original(&self) -> Option<Arc<dyn SendHandler>> {
        let state = self.state.read();
        match &state.interception {
            Some(interception) => interception.original.clone(),
            None => state.handler.clone(),
        }
    }

    /// Whether an interception is currently installed.
    pub fn is_intercepted(&self) -> bool {
        self.state.read().interception.is_some()
    }

    /// Whether `token` is the active interception.
    pub fn is_active(&self, token: InstallToken) -> bool {
        self.state
            .read()
            .interception
            .as_ref()
            .is_some_and(|i| i.token == token)
    }

    /// Install an interceptor.
    ///
    /// An active interception is torn down first. `make` receives the
    /// original handler (`None` when the slot had none of its own).
    pub fn intercept<F>(&self, make: F) -> InstallToken
    where
        F: FnOnce(Option<Arc<dyn SendHandler>>) -> Arc<dyn SendHandler>,
    {
        let mut state = self.state.write();
        if let Some(previous) = state.interception.take() {
            tracing::debug!(token = previous.token.0, "tearing down previous interception");
            state.handler = previous.original;
        }

        let original = state.handler.clone();
        let token = InstallToken::next();
        state.handler = Some(make(original.clone()));
        state.interception = Some(Interception { token, original });
        token
    }

    /// Put the original handler back.
    ///
    /// Returns `false` (and changes nothing) when `token` is no longer the
    /// active interception.
    pub fn restore(&self, token: InstallToken) -> bool {
        let mut state = self.state.write();
        match state.interception.take() {
            Some(active) if active.token == token => {
                state.handler = active.original;
                true
            }
            other => {
                state.interception = other;
                false
            }
        }
    }
}

impl fmt::Debug for MethodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("MethodSlot")
            .field("has_handler", &state.handler.is_some())
            .field(
                "interception",
                &state.interception.as_ref().map(|i| i.token),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
