// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stubbing and spying for service clients.
//!
//! [`mock_client`] replaces the `send` method of a client class or instance
//! with an interceptor that records every call and answers it from
//! configured rules:
//!
//! ```ignore
//! let sns = mock_client(&sns_class);
//! sns.on::<Publish>()?.resolves(json!({ "MessageId": "1" }));
//! sns.on_input::<Publish>(json!({ "TopicArn": ARN }))?
//!     .resolves_once(json!({ "MessageId": "2" }))
//!     .rejects(ServiceError::new("throttled").with_code("Throttling"));
//!
//! let out = client.send_command(&publish).await?;
//! assert_eq!(sns.command_calls::<Publish>(None).len(), 1);
//! ```
//!
//! Rules are consulted newest first; the most recently registered rule
//! that matches a call answers it. One-shot outcomes queued with the
//! `*_once` methods are used in order before the rule's default.
//!
//! [`spy_client`] records calls the same way but lets the original `send`
//! answer them.

pub mod env;
mod error;
mod interceptor;
mod matcher;
pub mod matchers;
mod mock;
mod options;
mod outcome;
mod rules;
mod spy;

#[cfg(test)]
mod test_helpers;

pub use error::MockError;
pub use matcher::{matches, InputFilter, Pattern, ValueMatcher};
pub use mock::{mock_client, mock_client_with, Behavior, ClientMock};
pub use options::MockOptions;
pub use outcome::{FakeFn, FakeReply};
pub use spy::{spy_client, spy_client_with, ClientSpy};

/// Re-exported capture types from the `clientmock-capture` crate.
pub mod capture {
    pub use clientmock_capture::{CallLedger, CallOutcome, CallRecord, CapturedCall};
}

/// Re-exported client model from the `clientmock-client` crate.
pub mod client {
    pub use clientmock_client::{
        handler_fn, Client, ClientClass, ClientError, Command, MockTarget, OperationId, Request,
        SendFuture, SendHandler, SendResult, ServiceError,
    };
}
