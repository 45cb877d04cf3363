// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interceptable service client model.
//!
//! A [`Client`] sends [`Request`]s through a single replaceable `send`
//! method. The method lives in a [`MethodSlot`], either on the client
//! instance or on its shared [`ClientClass`], so a test binding can swap it
//! for an interceptor and later hand the original back.

mod client;
mod error;
mod handler;
mod operation;
mod slot;

pub use client::{Client, ClientClass, MockTarget};
pub use error::{ClientError, ServiceError};
pub use handler::{handler_fn, SendFuture, SendHandler, SendResult};
pub use operation::{Command, OperationId, Request};
pub use slot::{InstallToken, MethodSlot};
