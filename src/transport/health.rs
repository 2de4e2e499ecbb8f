//! Plain HTTP liveness check
//!
//! Container healthchecks and load balancers speak plain HTTP
//! and never upgrade to a WebSocket. Before the handshake, the server peeks
//! at the request line without consuming it. `GET /health` is answered here
//! with the fixed JSON body and the connection is closed; everything else is
//! left untouched for `accept_async`.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::service::Health;
use crate::utils::error::Result;

pub const HEALTH_PATH: &str = "/health";

/// Longest request line worth inspecting.
const REQUEST_LINE_LIMIT: usize = 1024;
/// Largest request head read before answering.
const REQUEST_HEAD_LIMIT: usize = 8 * 1024;
const PEEK_ATTEMPTS: usize = 40;
const PEEK_BACKOFF: Duration = Duration::from_millis(5);

/// Whether an HTTP request line asks for the health endpoint.
pub fn is_health_request(request_line: &str) -> bool {
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return false;
    };
    let path = target.split('?').next().unwrap_or_default();

    method.eq_ignore_ascii_case("GET") && path == HEALTH_PATH
}

/// Read the request line without consuming it. Returns `None` if the peer
/// closed, or no complete line arrived within the limits.
pub async fn peek_request_line(stream: &TcpStream) -> Result<Option<String>> {
    let mut buf = [0u8; REQUEST_LINE_LIMIT];

    for _ in 0..PEEK_ATTEMPTS {
        let n = stream.peek(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        if let Some(end) = buf[..n].windows(2).position(|w| w == b"\r\n") {
            return Ok(Some(String::from_utf8_lossy(&buf[..end]).into_owned()));
        }
        if n == buf.len() {
            return Ok(None);
        }
        // partial line; peek returns the same bytes until more arrive
        tokio::time::sleep(PEEK_BACKOFF).await;
    }

    Ok(None)
}

/// Consume the request head and answer with the health body.
pub async fn respond(stream: &mut TcpStream, health: &Health) -> Result<()> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") && head.len() < REQUEST_HEAD_LIMIT {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
    }

    let body = serde_json::to_string(health)?;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;

    Ok(())
}
