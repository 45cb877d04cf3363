// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use clientmock_client::{
    handler_fn, Client, ClientClass, Command, OperationId, Request, SendFuture,
};
use futures_util::future;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:111111111111:MyTopic";
pub const TOPIC_ARN_2: &str = "arn:aws:sns:us-east-1:111111111111:MyOtherTopic";

#[derive(Serialize)]
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

#[derive(Serialize)]
pub struct ListTopics {}

impl Command for ListTopics {
    const OPERATION: &'static str = "ListTopics";
    type Output = Value;
}

pub fn publish(message: &str) -> Request {
    publish_to(TOPIC_ARN, message)
}

pub fn publish_to(topic_arn: &str, message: &str) -> Request {
    Request::new(
        OperationId::of::<Publish>().unwrap(),
        json!({ "TopicArn": topic_arn, "Message": message }),
    )
}

pub fn list_topics() -> Request {
    Request::new(OperationId::of::<ListTopics>().unwrap(), json!({}))
}

/// Class whose real `send` answers `{"Source": "real", "Operation": <name>}`.
pub fn sns_class() -> Arc<ClientClass> {
    ClientClass::new(
        "SnsClient",
        handler_fn(|_: &Client, request: Request| -> SendFuture {
            let output = json!({ "Source": "real", "Operation": request.operation.as_str() });
            future::ready(Ok(Some(output))).boxed()
        }),
    )
}

/// The real answer of [`sns_class`] for `operation`.
pub fn real_output(operation: &str) -> Option<Value> {
    Some(json!({ "Source": "real", "Operation": operation }))
}
