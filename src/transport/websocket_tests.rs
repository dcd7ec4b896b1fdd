use crate::broker::Broker;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::transport::websocket::{handle_client_message, serve};
use crate::utils::error::TransportError;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Ws = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

async fn setup_server_and_client() -> (Ws, Arc<Broker>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    let broker = Arc::new(Broker::new());

    tokio::spawn(serve(listener, broker.clone()));

    let (ws_stream, _) = connect_async(format!("ws://{addr}"))
        .await
        .expect("WebSocket handshake failed");
    (ws_stream, broker)
}

async fn request(ws: &mut Ws, frame: serde_json::Value) -> ServerMessage {
    ws.send(WsMessage::text(frame.to_string()))
        .await
        .expect("Failed to send frame");

    let response = ws
        .next()
        .await
        .expect("Did not receive response")
        .unwrap();
    let raw_data = response.into_data();
    serde_json::from_slice(&raw_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize ServerMessage from '{:?}': {}",
            raw_data, e
        );
    })
}

#[tokio::test]
async fn test_websocket_sensor_scenario() {
    let (mut ws, broker) = setup_server_and_client().await;

    let reply = request(
        &mut ws,
        json!({ "type": "attach_queue", "queueId": "q1", "topic": "sensors/temp" }),
    )
    .await;
    assert!(matches!(reply, ServerMessage::Ok {}));

    for (topic, v) in [("sensors/temp/room1", 21), ("sensors/humidity", 50)] {
        let reply = request(
            &mut ws,
            json!({ "type": "publish", "topic": topic, "data": { "v": v } }),
        )
        .await;
        assert!(matches!(reply, ServerMessage::Ok {}));
    }

    match request(&mut ws, json!({ "type": "get", "queueId": "q1" })).await {
        ServerMessage::Messages { messages } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].topic, "sensors/temp/room1");
            assert_eq!(messages[0].data, json!({ "v": 21 }));
        }
        other => panic!("Expected Messages, got {other:?}"),
    }

    match request(&mut ws, json!({ "type": "get", "queueId": "q1" })).await {
        ServerMessage::Messages { messages } => assert!(messages.is_empty()),
        other => panic!("Expected Messages, got {other:?}"),
    }
    assert_eq!(broker.queue_count(), 1);
}

#[tokio::test]
async fn test_websocket_invalid_frame_keeps_connection() {
    let (mut ws, _broker) = setup_server_and_client().await;

    match request(&mut ws, json!({ "type": "bogus" })).await {
        ServerMessage::Error { .. } => {}
        other => panic!("Expected Error, got {other:?}"),
    }

    let reply = request(
        &mut ws,
        json!({ "type": "attach_queue", "queueId": "q", "topic": "t" }),
    )
    .await;
    assert!(matches!(reply, ServerMessage::Ok {}));
}

#[tokio::test]
async fn test_websocket_clients_share_broker() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let broker = Arc::new(Broker::new());
    tokio::spawn(serve(listener, broker.clone()));

    let (mut consumer, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    let (mut producer, _) = connect_async(format!("ws://{addr}")).await.unwrap();

    request(
        &mut consumer,
        json!({ "type": "attach_queue", "queueId": "inbox", "topic": "chat" }),
    )
    .await;
    request(
        &mut producer,
        json!({ "type": "publish", "topic": "chat/general", "data": "hello world" }),
    )
    .await;

    match request(&mut consumer, json!({ "type": "get", "queueId": "inbox" })).await {
        ServerMessage::Messages { messages } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].data, json!("hello world"));
        }
        other => panic!("Expected Messages, got {other:?}"),
    }

    consumer.close(None).await.expect("Failed to close WebSocket");
    let res = consumer
        .send(WsMessage::Text("should not send".to_string().into()))
        .await;
    assert!(res.is_err());
}

#[test]
fn test_handle_attach_and_publish_frames() {
    let broker = Broker::new();

    let attach = json!({ "type": "attach_queue", "queueId": "q", "topic": "chat" }).to_string();
    assert!(matches!(handle_client_message(&broker, &attach), ServerMessage::Ok {}));

    let publish = json!({ "type": "publish", "topic": "chat/room", "data": "hi" }).to_string();
    assert!(matches!(handle_client_message(&broker, &publish), ServerMessage::Ok {}));

    assert_eq!(broker.buffered("q"), Some(1));
}

#[test]
fn test_handle_get_frame_drains() {
    let broker = Broker::new();
    broker.attach_queue("q", "chat");
    broker.publish("chat", json!(1));

    let get = json!({ "type": "get", "queueId": "q" }).to_string();
    match handle_client_message(&broker, &get) {
        ServerMessage::Messages { messages } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].topic, "chat");
        }
        other => panic!("Expected Messages, got {other:?}"),
    }
    assert_eq!(broker.buffered("q"), Some(0));
}

#[test]
fn test_handle_get_frame_requires_queue_id() {
    let broker = Broker::new();
    let get = json!({ "type": "get", "queueId": "" }).to_string();
    match handle_client_message(&broker, &get) {
        ServerMessage::Error { message } => assert_eq!(message, "Missing queueId"),
        other => panic!("Expected Error, got {other:?}"),
    }
}

#[test]
fn test_handle_invalid_frame() {
    let broker = Broker::new();
    for text in ["not json", r#"{"type":"subscribe","topic":"x"}"#] {
        assert!(matches!(
            handle_client_message(&broker, text),
            ServerMessage::Error { .. }
        ));
    }
}

#[test]
fn test_client_message_wire_format() {
    let msg: ClientMessage =
        serde_json::from_str(r#"{"type":"attach_queue","queueId":"q","topic":"a/b"}"#).unwrap();
    match msg {
        ClientMessage::AttachQueue { queue_id, topic } => {
            assert_eq!(queue_id, "q");
            assert_eq!(topic, "a/b");
        }
        other => panic!("Expected AttachQueue, got {other:?}"),
    }
}

#[test]
fn test_websocket_error_converts_into_transport_error() {
    let err = TransportError::from(tungstenite::Error::ConnectionClosed);
    assert!(matches!(err, TransportError::WebSocket(_)));
    assert!(err.to_string().starts_with("WebSocket error"));
}

#[tokio::test]
async fn test_websocket_bad_handshake_does_not_stop_server() {
    use tokio::io::AsyncWriteExt;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let broker = Arc::new(Broker::new());
    tokio::spawn(serve(listener, broker.clone()));

    let mut raw = tokio::net::TcpStream::connect(addr).await.unwrap();
    raw.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    drop(raw);

    let (mut ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    let reply = request(
        &mut ws,
        json!({ "type": "attach_queue", "queueId": "q", "topic": "t" }),
    )
    .await;
    assert!(matches!(reply, ServerMessage::Ok {}));
    assert_eq!(broker.queue_count(), 1);
}
