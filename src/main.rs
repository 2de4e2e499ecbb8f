//! CLI for EchoSub
//!
//! Subcommands:
//! - `server`: run the WebSocket server
//! - `client`: subscribe, create one message and print what comes back
//!   (useful for smoke tests)

use std::sync::Arc;

use clap::Parser;
use echosub::config::load_config;
use echosub::service::EchoService;
use echosub::transport::message::ServerMessage;
use echosub::transport::websocket::start_websocket_server;
use echosub::utils::error::{Error, Result};
use echosub::utils::logging;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "echosub")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Run the example client (subscribe, create, wait for the event)
    Client {
        /// WebSocket server URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
        /// Text of the message to create
        #[arg(long, default_value = "Hello from echosub")]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            if let Err(e) = run_server().await {
                logging::init("info");
                error!("Server failed: {e}");
            }
        }
        Command::Client { url, text } => {
            logging::init("info");
            if let Err(e) = run_client(&url, &text).await {
                error!("Client failed: {e}");
            }
        }
    }
}

async fn run_server() -> Result<()> {
    let config = load_config()?;
    logging::init(&config.log.level);

    let service = Arc::new(EchoService::with_settings(&config.broker));

    tokio::select! {
        res = start_websocket_server(service, config) => {
            res?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str, text: &str) -> Result<()> {
    let (mut ws_stream, _response) = connect_async(url).await?;

    // 1. Subscribe
    let subscribe = json!({ "type": "subscribe_messages" });
    ws_stream
        .send(WsMessage::Text(subscribe.to_string().into()))
        .await?;
    let subscription_id = match next_frame(&mut ws_stream).await? {
        ServerMessage::Subscribed { subscription_id } => subscription_id,
        other => return Err(Error::UnexpectedResponse(format!("{other:?}"))),
    };

    // 2. Create
    let create = json!({ "type": "create_message", "text": text });
    ws_stream
        .send(WsMessage::Text(create.to_string().into()))
        .await?;

    // 3. Wait for both the result and the pushed event, in either order
    let mut got_result = false;
    let mut got_event = false;
    while !(got_result && got_event) {
        match next_frame(&mut ws_stream).await? {
            ServerMessage::EchoResult(_) => got_result = true,
            ServerMessage::Event { .. } => got_event = true,
            _ => {}
        }
    }

    // 4. Unsubscribe and wait for the stream to complete
    let unsubscribe = json!({ "type": "unsubscribe", "subscription_id": subscription_id });
    ws_stream
        .send(WsMessage::Text(unsubscribe.to_string().into()))
        .await?;
    loop {
        if let ServerMessage::Complete { .. } = next_frame(&mut ws_stream).await? {
            break;
        }
    }

    ws_stream.close(None).await?;
    Ok(())
}

/// Read until the next text frame and decode it.
async fn next_frame(ws_stream: &mut WebSocketStream<MaybeTlsStream<TcpStream>>) -> Result<ServerMessage> {
    while let Some(frame) = ws_stream.next().await {
        if let WsMessage::Text(msg) = frame? {
            println!("Incoming: {msg}");
            return Ok(serde_json::from_str(msg.as_str())?);
        }
    }

    Err(Error::UnexpectedResponse("connection closed".to_string()))
}
