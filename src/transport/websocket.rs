//! WebSocket transport
//!
//! This file implements a minimal WebSocket server that translates protocol
//! JSON frames into broker operations. Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Create a `Client` for each connection with its own send loop
//! - Decode `attach_queue`, `publish` and `get` frames, call the broker and
//!   reply with `ok`, `messages` or `error`
//!
//! A bad frame gets an error reply and the connection stays open.

use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::{WebSocketStream, accept_async};
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::Arc;

use crate::broker::Broker;
use crate::client::Client;
use crate::transport::message::{ClientMessage, MISSING_QUEUE_ID, ServerMessage};
use crate::utils::error::TransportError;

pub async fn start_websocket_server(
    addr: String,
    broker: Arc<Broker>,
) -> Result<(), TransportError> {
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, broker).await
}

/// Accept connections on an already bound listener until accepting fails.
pub async fn serve(listener: TcpListener, broker: Arc<Broker>) -> Result<(), TransportError> {
    info!("WebSocket server listening on ws://{}", listener.local_addr()?);

    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "Accepted TCP connection");
        let broker = broker.clone();
        spawn(async move {
            if let Err(e) = handle_connection(stream, broker).await {
                warn!(%peer, "Connection closed with error: {e}");
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    broker: Arc<Broker>,
) -> Result<(), TransportError> {
    let ws_stream = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    info!("{} connected", client.id);

    let send_loop = {
        let client_id = client.id.clone();
        spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    let err = TransportError::from(e);
                    warn!("Failed to send message to {client_id}: {err}");
                    return Err(err);
                }
            }
            ws_sender.close().await?;
            debug!("Send loop closed for {client_id}");
            Ok::<_, TransportError>(())
        })
    };

    let result = read_loop(&mut ws_receiver, &client, &broker).await;
    info!("{} disconnected", client.id);

    // Dropping the client closes the channel and ends the send loop.
    drop(client);
    if let Ok(Err(e)) = send_loop.await {
        debug!("Send loop ended with error: {e}");
    }
    result
}

async fn read_loop(
    ws_receiver: &mut SplitStream<WebSocketStream<TcpStream>>,
    client: &Client,
    broker: &Broker,
) -> Result<(), TransportError> {
    while let Some(frame) = ws_receiver.next().await {
        let msg = frame?;
        if msg.is_close() {
            break;
        }
        if !msg.is_text() {
            continue;
        }
        let Ok(text) = msg.to_text() else {
            continue;
        };

        let reply = handle_client_message(broker, text);
        if let ServerMessage::Error { message } = &reply {
            warn!(
                "Invalid client message from {}: {message} | {}",
                client.id,
                text.chars().take(100).collect::<String>()
            );
        }
        client.send(&reply)?;
    }
    Ok(())
}

/// Decode one text frame, apply it to the broker and build the reply.
pub fn handle_client_message(broker: &Broker, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::AttachQueue { queue_id, topic }) => {
            broker.attach_queue(queue_id, &topic);
            ServerMessage::Ok {}
        }
        Ok(ClientMessage::Publish { topic, data }) => {
            broker.publish(&topic, data);
            ServerMessage::Ok {}
        }
        Ok(ClientMessage::Get { queue_id }) if queue_id.is_empty() => ServerMessage::Error {
            message: MISSING_QUEUE_ID.to_string(),
        },
        Ok(ClientMessage::Get { queue_id }) => ServerMessage::Messages {
            messages: broker.drain_queue(&queue_id),
        },
        Err(err) => ServerMessage::Error {
            message: err.to_string(),
        },
    }
}
