//! WebSocket transport
//!
//! A minimal WebSocket server that translates JSON frames into `EchoService`
//! calls. Responsibilities:
//! - Accept TCP connections, answering plain `GET /health` before any
//!   WebSocket handshake
//! - Create a `Client` for each connection with a bounded outbound channel
//!   drained by a writer task, which also sends keep-alive pings
//! - Decode client frames, call the service and queue the reply. Replies
//!   wait for room in the outbound channel, which only slows the
//!   connection that sent the request
//! - Forward each subscription's messages to the connection as `event`
//!   frames, followed by `complete` when the subscription ends. Events never
//!   wait: if the outbound channel is full the event is dropped, the same
//!   policy the broadcaster applies
//! - Unsubscribe everything a connection opened once it closes

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc::{self, Sender, error::TrySendError};
use tokio::time::{Instant, interval_at};
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::broker::Subscription;
use crate::client::Client;
use crate::config::{ServerSettings, Settings};
use crate::service::EchoService;
use crate::transport::health;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::Result;

/// Bind `settings.addr()` and serve connections until the listener fails.
pub async fn start_websocket_server(service: Arc<EchoService>, settings: Settings) -> Result<()> {
    let addr = settings.addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("WebSocket server listening on ws://{addr}");

    serve(listener, service, settings).await
}

/// Serve connections from an already bound listener.
pub async fn serve(listener: TcpListener, service: Arc<EchoService>, settings: Settings) -> Result<()> {
    let server = Arc::new(settings.server);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {e}");
                continue;
            }
        };
        let service = service.clone();
        let server = server.clone();

        spawn(async move {
            if let Err(e) = handle_connection(stream, service, &server).await {
                warn!("Connection from {peer} ended with error: {e}");
            }
        });
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    service: Arc<EchoService>,
    server: &ServerSettings,
) -> Result<()> {
    if let Some(line) = health::peek_request_line(&stream).await? {
        if health::is_health_request(&line) {
            debug!("Answering health check");
            return health::respond(&mut stream, &service.health()).await;
        }
    }

    let keep_alive = (server.keep_alive_secs > 0).then(|| Duration::from_secs(server.keep_alive_secs));
    let ws_stream = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::channel::<WsMessage>(server.outbound_capacity.max(1));
    let mut client = Client::new(tx);
    let client_id = client.id.clone();

    info!("{client_id} connected");

    let writer = {
        let client_id = client_id.clone();

        spawn(async move {
            let mut ping = keep_alive.map(|period| interval_at(Instant::now() + period, period));

            loop {
                let next = match ping.as_mut() {
                    Some(ping) => tokio::select! {
                        msg = rx.recv() => msg,
                        _ = ping.tick() => Some(WsMessage::Ping(Default::default())),
                    },
                    None => rx.recv().await,
                };
                let Some(msg) = next else { break };

                if let Err(e) = ws_sender.send(msg).await {
                    warn!("Failed to send message to {client_id}: {e}");
                    break;
                }
            }

            debug!("Send loop closed for {client_id}");
        })
    };

    while let Some(frame) = ws_receiver.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to read from {client_id}: {e}");
                break;
            }
        };

        match frame {
            WsMessage::Text(text) => handle_text(&service, &mut client, text.as_str()).await,
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    info!("{client_id} disconnected");

    for id in client.drain_subscriptions() {
        service.unsubscribe(id);
    }
    drop(client);
    writer.abort();

    Ok(())
}

/// Decode one text frame and answer it on the client's channel. Frames that
/// are not valid requests get an `error` frame back.
pub async fn handle_text(service: &Arc<EchoService>, client: &mut Client, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(request) => dispatch(service, client, request).await,
        Err(err) => {
            warn!(
                "Invalid client message from {}: {err} | {}",
                client.id,
                text.chars().take(100).collect::<String>()
            );
            send_reply(
                &client.sender,
                &ServerMessage::Error {
                    message: format!("invalid request: {err}"),
                },
            )
            .await;
        }
    }
}

/// Run one request against the service and queue its reply.
pub async fn dispatch(service: &Arc<EchoService>, client: &mut Client, request: ClientMessage) {
    let reply = match request {
        ClientMessage::CreateMessage { text } => ServerMessage::EchoResult(service.create_message(text)),
        ClientMessage::GetMessage { id } => ServerMessage::Message {
            message: service.get_message(&id),
        },
        ClientMessage::ListMessages => ServerMessage::Messages {
            messages: service.list_messages(),
        },
        ClientMessage::SubscribeMessages => {
            let subscription = service.subscribe_messages();
            let subscription_id = subscription.id();
            client.track(subscription_id);
            info!("{} subscribed as {subscription_id}", client.id);

            // queue the ack before the forwarder can queue any event
            send_reply(&client.sender, &ServerMessage::Subscribed { subscription_id }).await;
            spawn(forward_subscription(subscription, client.sender.clone()));
            return;
        }
        ClientMessage::Unsubscribe { subscription_id } => {
            // a connection may only close its own subscriptions
            let removed = client.untrack(subscription_id) && service.unsubscribe(subscription_id);
            ServerMessage::Unsubscribed {
                subscription_id,
                removed,
            }
        }
        ClientMessage::Health => ServerMessage::Health {
            status: service.health().status,
        },
    };

    send_reply(&client.sender, &reply).await;
}

async fn forward_subscription(mut subscription: Subscription, sender: Sender<WsMessage>) {
    let subscription_id = subscription.id();

    while let Some(message) = subscription.recv().await {
        let Some(frame) = encode(&ServerMessage::Event { subscription_id, message }) else {
            continue;
        };
        match sender.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                debug!("Outbound queue full, dropping event for {subscription_id}");
            }
            Err(TrySendError::Closed(_)) => return,
        }
    }

    // `complete` is never dropped
    send_reply(&sender, &ServerMessage::Complete { subscription_id }).await;
}

/// Queue a reply, waiting for room in the outbound channel.
async fn send_reply(sender: &Sender<WsMessage>, frame: &ServerMessage) {
    if let Some(frame) = encode(frame) {
        if sender.send(frame).await.is_err() {
            debug!("Connection closed before reply could be queued");
        }
    }
}

fn encode(frame: &ServerMessage) -> Option<WsMessage> {
    match serde_json::to_string(frame) {
        Ok(json) => Some(WsMessage::text(json)),
        Err(e) => {
            error!("Failed to serialize frame: {e}");
            None
        }
    }
}
