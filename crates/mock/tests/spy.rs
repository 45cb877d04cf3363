// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Spies record calls and leave the answers to whatever `send` they wrap.

mod common;

use clientmock::capture::CallOutcome;
use clientmock::client::{handler_fn, Client, ClientClass, Request, SendFuture};
use clientmock::{mock_client, spy_client};
use common::*;
use futures_util::future;
use futures_util::FutureExt;
use serde_json::json;

fn echo_class() -> std::sync::Arc<ClientClass> {
    ClientClass::new(
        "EchoClient",
        handler_fn(|_: &Client, request: Request| -> SendFuture {
            future::ready(Ok(Some(json!({ "Echo": request.input })))).boxed()
        }),
    )
}

#[tokio::test]
async fn records_rejections_from_the_real_client() {
    let class = sns_class();
    let spy = spy_client(&class);

    let err = send(&class.instance(), &publish_cmd_1()).await.unwrap_err();

    assert!(err.starts_with("RealClientCalled"));
    match spy.call(0).unwrap().outcome() {
        CallOutcome::Rejected { error } => assert_eq!(error.name, "RealClientCalled"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn passes_outputs_through_unchanged() {
    let class = echo_class();
    let spy = spy_client(&class);
    let client = class.instance();

    let request = Request::from_command(&publish_cmd_1()).unwrap();
    let output = client.send(request).await.unwrap();

    let expected = json!({ "Echo": input_of(&publish_cmd_1()) });
    assert_eq!(output, Some(expected.clone()));
    assert_eq!(
        spy.calls()[0].outcome(),
        CallOutcome::Resolved {
            output: Some(expected)
        }
    );
}

#[tokio::test]
async fn instance_spy_wraps_class_mock() {
    let class = sns_class();
    let mock = mock_client(&class);
    mock.resolves(message_id(UUID_1));

    let sns = class.instance();
    let spy = spy_client(&sns);
    let publish = send(&sns, &publish_cmd_1()).await.unwrap();

    assert_eq!(publish, published(UUID_1));
    assert_eq!(spy.calls().len(), 1);
    assert_eq!(mock.calls().len(), 1);
    assert_eq!(spy.calls()[0].input(), mock.calls()[0].input());
}

#[tokio::test]
async fn spy_replaced_by_mock_stops_recording() {
    let class = echo_class();
    let spy = spy_client(&class);
    class
        .instance()
        .send(Request::from_command(&publish_cmd_1()).unwrap())
        .await
        .unwrap();

    let mock = mock_client(&class);
    let output = class
        .instance()
        .send(Request::from_command(&publish_cmd_2()).unwrap())
        .await
        .unwrap();

    assert_eq!(output, None);
    assert_eq!(spy.calls().len(), 1);
    assert_eq!(mock.calls().len(), 1);
    assert!(spy.is_restored());
}

#[tokio::test]
async fn spy_reset_reinstalls_with_empty_history() {
    let class = echo_class();
    let spy = spy_client(&class);
    let client = class.instance();
    client
        .send(Request::from_command(&publish_cmd_1()).unwrap())
        .await
        .unwrap();
    let before = spy.calls();

    spy.reset();
    client
        .send(Request::from_command(&publish_cmd_2()).unwrap())
        .await
        .unwrap();

    assert_eq!(before.len(), 1);
    assert_eq!(spy.calls().len(), 1);
    assert_eq!(spy.calls()[0].input(), &input_of(&publish_cmd_2()));
    assert_eq!(spy.command_calls::<Publish>(Some(strict(&publish_cmd_1()))).len(), 0);
}
