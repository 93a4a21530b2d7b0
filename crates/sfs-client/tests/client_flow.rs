// crates/sfs-client/tests/client_flow.rs
use std::sync::Arc;

use bytes::Bytes;
use sfs_client::{ChannelTransport, Client, ClientConfig, ClientError, ClientEvent, TransportError};
use sfs_core::find_users::{KEY_EXPRESSION, KEY_ROOM};
use sfs_core::{
    Clause, FindUsersRequest, MatchExpression, NumberMatch, RequestType, SearchScope, SfsArray,
    SfsObject,
};
use sfs_protocol::{decode_message, encode_object, ProtocolError};
use tokio::sync::mpsc;

fn request(scope: SearchScope) -> FindUsersRequest {
    let expr = MatchExpression::new(Clause::number("level", NumberMatch::GreaterThanOrEqualTo, 10));
    FindUsersRequest::new(Some(expr), scope, 20)
}

fn server_payload(action: i16, params: SfsObject) -> Vec<u8> {
    let mut envelope = SfsObject::new();
    envelope.put_byte("c", 0);
    envelope.put_short("a", action);
    envelope.put_object("p", params);

    let mut buf = Vec::new();
    encode_object(&envelope, &mut buf).unwrap();
    buf
}

fn users_found_payload(names: &[&str]) -> (Vec<u8>, SfsArray) {
    let mut users = SfsArray::new();
    for (i, name) in names.iter().enumerate() {
        let mut user = SfsArray::new();
        user.add_int(i as i32 + 1);
        user.add_utf_string(*name);
        users.add_array(user);
    }

    let mut params = SfsObject::new();
    params.put_array("fu", users.clone());
    (server_payload(28, params), users)
}

#[tokio::test]
async fn valid_request_reaches_the_transport() {
    let (transport, mut frames) = ChannelTransport::pair();
    let (client, _events) = Client::new(transport, ClientConfig::default());

    client.send(&request(SearchScope::Room(42))).unwrap();

    let frame = frames.recv().await.expect("one frame");
    let msg = decode_message(&frame).unwrap();

    assert_eq!(msg.controller, 0);
    assert_eq!(msg.request_type(), Some(RequestType::FindUsers));
    assert!(msg.params.contains_key(KEY_EXPRESSION));
    assert_eq!(msg.params.get_int(KEY_ROOM), Some(42));
}

#[tokio::test]
async fn invalid_request_is_rejected_before_transmission() {
    let (transport, mut frames) = ChannelTransport::pair();
    let (client, _events) = Client::new(transport, ClientConfig::default());

    let missing = FindUsersRequest::new(None, SearchScope::Zone, 0);
    match client.send(&missing) {
        Err(ClientError::Validation(e)) => {
            assert_eq!(e.failures(), ["Missing Match Expression".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    assert!(frames.try_recv().is_err(), "nothing may be transmitted");
}

#[tokio::test]
async fn closed_transport_is_reported() {
    let (transport, frames) = ChannelTransport::pair();
    drop(frames);
    let (client, _events) = Client::new(transport, ClientConfig::default());

    let err = client.send(&request(SearchScope::Zone)).unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Closed)));
}

#[tokio::test]
async fn users_found_answer_becomes_an_event() {
    let (transport, _frames) = ChannelTransport::pair();
    let (client, mut events) = Client::new(transport, ClientConfig::default());

    let (payload, users) = users_found_payload(&["mario", "luigi"]);
    client.handle_inbound(&payload).unwrap();

    assert_eq!(events.recv().await, Some(ClientEvent::UsersFound { users }));
}

#[tokio::test]
async fn unknown_actions_are_passed_through() {
    let (transport, _frames) = ChannelTransport::pair();
    let (client, mut events) = Client::new(transport, ClientConfig::default());

    let mut params = SfsObject::new();
    params.put_utf_string("m", "hello");
    client.handle_inbound(&server_payload(7, params.clone())).unwrap();

    match events.recv().await {
        Some(ClientEvent::Unhandled(msg)) => {
            assert_eq!(msg.action, 7);
            assert_eq!(msg.params, params);
        }
        other => panic!("expected unhandled event, got {:?}", other),
    }
}

#[tokio::test]
async fn inbound_loop_skips_garbage_and_stops_when_input_closes() {
    let (transport, _frames) = ChannelTransport::pair();
    let (client, mut events) = Client::new(transport, ClientConfig::default());
    let client = Arc::new(client);

    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Bytes>();
    let loop_client = client.clone();
    let handle = tokio::spawn(async move { loop_client.run_inbound(inbound_rx).await });

    let (payload, users) = users_found_payload(&["peach"]);
    inbound_tx.send(Bytes::from_static(&[0xFF, 0x00])).unwrap();
    inbound_tx.send(Bytes::from(payload)).unwrap();
    drop(inbound_tx);

    handle.await.unwrap();

    assert_eq!(events.recv().await, Some(ClientEvent::UsersFound { users }));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn inbound_loop_survives_a_deeply_nested_payload() {
    let (transport, _frames) = ChannelTransport::pair();
    let (client, mut events) = Client::new(transport, ClientConfig::default());

    // {x: [[[ ... ]]]} far deeper than the decoder accepts
    let mut deep = vec![18u8, 0, 1, 0, 1, b'x'];
    for _ in 0..200_000 {
        deep.extend_from_slice(&[17, 0, 1]);
    }
    deep.extend_from_slice(&[17, 0, 0]);

    let err = client.handle_inbound(&deep).unwrap_err();
    assert!(matches!(err, ClientError::Protocol(ProtocolError::DepthExceeded(_))));

    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Bytes>();
    let (payload, users) = users_found_payload(&["toad"]);
    inbound_tx.send(Bytes::from(deep)).unwrap();
    inbound_tx.send(Bytes::from(payload)).unwrap();
    drop(inbound_tx);

    client.run_inbound(inbound_rx).await;

    assert_eq!(events.recv().await, Some(ClientEvent::UsersFound { users }));
    assert!(events.try_recv().is_err());
}
