// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client classes and instances.

use crate::error::{ClientError, ServiceError};
use crate::handler::{SendFuture, SendHandler};
use crate::operation::{Command, Request};
use crate::slot::MethodSlot;
use futures_util::future;
use futures_util::FutureExt;
use std::fmt;
use std::sync::Arc;

/// Shared definition of a client type.
///
/// Holds the real `send` implementation in a slot shared by every
/// instance, so replacing it affects all clients of the class that do not
/// carry their own override.
pub struct ClientClass {
    name: String,
    slot: Arc<MethodSlot>,
}

impl ClientClass {
    /// Define a client class whose real `send` is `handler`.
    pub fn new(name: impl Into<String>, handler: Arc<dyn SendHandler>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            slot: Arc::new(MethodSlot::with_handler(handler)),
        })
    }

    /// Class name, e.g. `SnsClient`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared `send` slot.
    pub fn slot(&self) -> &Arc<MethodSlot> {
        &self.slot
    }

    /// Create a new client instance of this class.
    pub fn instance(self: &Arc<Self>) -> Client {
        Client {
            class: Arc::clone(self),
            slot: Arc::new(MethodSlot::empty()),
        }
    }
}

impl fmt::Debug for ClientClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientClass")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish()
    }
}

/// A client instance.
///
/// Clones refer to the same instance and share its `send` override.
#[derive(Clone)]
pub struct Client {
    class: Arc<ClientClass>,
    slot: Arc<MethodSlot>,
}

impl Client {
    /// The class this client was created from.
    pub fn class(&self) -> &Arc<ClientClass> {
        &self.class
    }

    /// The instance's own `send` slot.
    pub fn slot(&self) -> &Arc<MethodSlot> {
        &self.slot
    }

    /// Send a request.
    ///
    /// Uses the instance override if one is installed, otherwise the class
    /// implementation.
    pub fn send(&self, request: Request) -> SendFuture {
        match self.slot.current().or_else(|| self.class.slot.current()) {
            Some(handler) => handler.send(self, request),
            None => {
                let error = ServiceError::new(format!(
                    "{} has no send implementation for {}",
                    self.class.name, request.operation
                ))
                .with_name("NoHandler");
                future::ready(Err(error)).boxed()
            }
        }
    }

    /// Send a typed command and decode its output.
    pub async fn send_command<C: Command>(
        &self,
        command: &C,
    ) -> Result<Option<C::Output>, ClientError> {
        let request = Request::from_command(command)?;
        let output = self.send(request).await?;
        output
            .map(|value| serde_json::from_value(value).map_err(ClientError::Decode))
            .transpose()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("class", &self.class.name)
            .field("slot", &self.slot)
            .finish()
    }
}

/// Something whose `send` method can be intercepted: a whole class or a
/// single instance.
pub trait MockTarget {
    /// Slot holding the `send` method to replace.
    fn send_slot(&self) -> Arc<MethodSlot>;

    /// Class name used when describing the target.
    fn client_name(&self) -> String;
}

impl MockTarget for ClientClass {
    fn send_slot(&self) -> Arc<MethodSlot> {
        Arc::clone(&self.slot)
    }

    fn client_name(&self) -> String {
        self.name.clone()
    }
}

impl MockTarget for Client {
    fn send_slot(&self) -> Arc<MethodSlot> {
        Arc::clone(&self.slot)
    }

    fn client_name(&self) -> String {
        self.class.name.clone()
    }
}

impl<T: MockTarget + ?Sized> MockTarget for Arc<T> {
    fn send_slot(&self) -> Arc<MethodSlot> {
        (**self).send_slot()
    }

    fn client_name(&self) -> String {
        (**self).client_name()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
