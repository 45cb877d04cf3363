// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared fixtures for the behavior suites.
//!
//! Each test builds its own `SnsClient` class, so suites never share an
//! interception.

#![allow(dead_code)]

use clientmock::client::{handler_fn, Client, ClientClass, Command, SendFuture, SendResult};
use clientmock::{Behavior, ClientMock, FakeReply, InputFilter};
use futures_util::future;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:111111111111:MyTopic";
pub const TOPIC_ARN_2: &str = "arn:aws:sns:us-east-1:111111111111:MyOtherTopic";

pub const UUID_1: &str = "12345678-1111-2222-3333-4444555566666";
pub const UUID_2: &str = "12345678-4444-3333-2222-1111555566666";
pub const UUID_3: &str = "12345678-1111-3333-2222-4444555566666";

// =============================================================================
// Commands
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Publish {
    pub topic_arn: String,
    pub message: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PublishOutput {
    pub message_id: String,
}

impl Command for Publish {
    const OPERATION: &'static str = "Publish";
    type Output = PublishOutput;
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ListTopics {}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ListTopicsOutput {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Topic {
    pub topic_arn: String,
}

impl Command for ListTopics {
    const OPERATION: &'static str = "ListTopics";
    type Output = ListTopicsOutput;
}

pub fn publish_cmd_1() -> Publish {
    Publish {
        topic_arn: TOPIC_ARN.to_string(),
        message: "mock message".to_string(),
    }
}

pub fn publish_cmd_2() -> Publish {
    Publish {
        topic_arn: TOPIC_ARN.to_string(),
        message: "second mock message".to_string(),
    }
}

pub fn publish_cmd_3() -> Publish {
    Publish {
        topic_arn: TOPIC_ARN_2.to_string(),
        message: "third mock message".to_string(),
    }
}

/// JSON input of a command.
pub fn input_of<C: Serialize>(command: &C) -> Value {
    serde_json::to_value(command).unwrap()
}

pub fn message_id(id: &str) -> Value {
    json!({ "MessageId": id })
}

pub fn published(id: &str) -> Option<PublishOutput> {
    Some(PublishOutput {
        message_id: id.to_string(),
    })
}

pub fn one_topic() -> Value {
    json!({ "Topics": [{ "TopicArn": TOPIC_ARN }] })
}

// =============================================================================
// Client
// =============================================================================

/// A fresh `SnsClient` class whose real `send` always fails, so a call that
/// escapes the mock is obvious.
pub fn sns_class() -> Arc<ClientClass> {
    ClientClass::new(
        "SnsClient",
        handler_fn(|_: &Client, request| -> SendFuture {
            let error = clientmock::client::ServiceError::new(format!(
                "network access attempted for {}",
                request.operation
            ))
            .with_name("RealClientCalled");
            future::ready(Err(error)).boxed()
        }),
    )
}

/// Send a typed command through `client`, panicking on client-side errors
/// other than a service rejection.
pub async fn send<C: Command>(client: &Client, command: &C) -> Result<Option<C::Output>, String> {
    match client.send_command(command).await {
        Ok(output) => Ok(output),
        Err(clientmock::client::ClientError::Service(error)) => Err(error.to_string()),
        Err(other) => panic!("unexpected client error: {}", other),
    }
}

/// Deferred result that settles after yielding to the runtime once.
pub fn resolve_later(output: Value) -> SendFuture {
    async move {
        tokio::task::yield_now().await;
        SendResult::Ok(Some(output))
    }
    .boxed()
}

// =============================================================================
// Behavior levels
// =============================================================================

/// Where a behavior is declared.
#[derive(Clone, Copy, Debug)]
pub enum Level {
    Client,
    AnyCommand,
    AnyCommandWithInput,
    Command,
    CommandWithInput,
}

/// Either the mock itself or a rule handle; both configure the same way.
pub enum Target<'a> {
    Mock(&'a ClientMock),
    Rule(Behavior<'a>),
}

impl Level {
    /// Behavior at this level that matches `publish_cmd_1`.
    pub fn target(self, mock: &ClientMock) -> Target<'_> {
        match self {
            Level::Client => Target::Mock(mock),
            Level::AnyCommand => Target::Rule(mock.on_any_command()),
            Level::AnyCommandWithInput => {
                Target::Rule(mock.on_any_command_input(input_of(&publish_cmd_1())))
            }
            Level::Command => Target::Rule(mock.on::<Publish>().unwrap()),
            Level::CommandWithInput => {
                let input = input_of(&publish_cmd_1());
                Target::Rule(mock.on_input::<Publish>(input).unwrap())
            }
        }
    }
}

impl<'a> Target<'a> {
    pub fn resolves(&self, output: Value) {
        match self {
            Target::Mock(mock) => {
                mock.resolves(output);
            }
            Target::Rule(rule) => {
                rule.clone().resolves(output);
            }
        }
    }

    pub fn resolves_once(&self, output: Value) {
        match self {
            Target::Mock(mock) => {
                mock.resolves_once(output);
            }
            Target::Rule(rule) => {
                rule.clone().resolves_once(output);
            }
        }
    }

    pub fn rejects(&self, error: clientmock::client::ServiceError) {
        match self {
            Target::Mock(mock) => {
                mock.rejects(error);
            }
            Target::Rule(rule) => {
                rule.clone().rejects(error);
            }
        }
    }

    pub fn rejects_once(&self, error: clientmock::client::ServiceError) {
        match self {
            Target::Mock(mock) => {
                mock.rejects_once(error);
            }
            Target::Rule(rule) => {
                rule.clone().rejects_once(error);
            }
        }
    }

    pub fn resolves_with(&self, future: SendFuture) {
        match self {
            Target::Mock(mock) => {
                mock.resolves_with(future);
            }
            Target::Rule(rule) => {
                rule.clone().resolves_with(future);
            }
        }
    }

    pub fn calls_fake<F, R>(&self, f: F)
    where
        F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
        R: Into<FakeReply>,
    {
        match self {
            Target::Mock(mock) => {
                mock.calls_fake(f);
            }
            Target::Rule(rule) => {
                rule.clone().calls_fake(f);
            }
        }
    }

    pub fn calls_fake_once<F, R>(&self, f: F)
    where
        F: Fn(&Value, &Client) -> R + Send + Sync + 'static,
        R: Into<FakeReply>,
    {
        match self {
            Target::Mock(mock) => {
                mock.calls_fake_once(f);
            }
            Target::Rule(rule) => {
                rule.clone().calls_fake_once(f);
            }
        }
    }
}

/// Strict filter shortcut.
pub fn strict<C: Serialize>(command: &C) -> InputFilter {
    InputFilter::strict(input_of(command))
}
