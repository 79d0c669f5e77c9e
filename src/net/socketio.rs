//! Socket.IO packets over an Engine.IO v4 WebSocket
//!
//! The room server speaks Socket.IO. On a WebSocket transport each text
//! message is one Engine.IO packet, a single type digit followed by its
//! payload. Type `4` carries a Socket.IO packet with its own type digit:
//!
//! ```text
//! 0{"sid":"..","pingInterval":25000,"pingTimeout":20000}   open
//! 2 / 3                                                     ping / pong
//! 40 / 40{"sid":".."}                                       connect / connected
//! 41                                                        disconnect
//! 42["make-move",{"row":2,"col":3}]                         event
//! 44{"message":".."}                                        connect refused
//! ```
//!
//! Only the default namespace is used.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::PacketError;

/// Socket.IO connect request for the default namespace
pub const CONNECT: &str = "40";
/// Socket.IO disconnect for the default namespace
pub const DISCONNECT: &str = "41";
/// Engine.IO pong, the reply to a server ping
pub const PONG: &str = "3";

/// Path the Socket.IO server listens on, with the query for a WebSocket-only session
const HANDSHAKE_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Session parameters from the Engine.IO open packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
}

fn default_ping_interval() -> u64 {
    25_000
}

fn default_ping_timeout() -> u64 {
    20_000
}

impl Handshake {
    /// How long the server may stay silent before the session counts as lost
    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.ping_interval + self.ping_timeout)
    }
}

/// One decoded text message.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Noop,
    /// Namespace joined
    Connected,
    /// Namespace join refused, with the server's reason
    ConnectError(String),
    Disconnect,
    Event { name: String, data: Value },
}

/// Decode one WebSocket text message.
pub fn decode(text: &str) -> Result<Packet, PacketError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let rest = chars.as_str();

    match kind {
        '0' => serde_json::from_str(rest)
            .map(Packet::Open)
            .map_err(|err| PacketError::Payload(err.to_string())),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '6' => Ok(Packet::Noop),
        '4' => decode_socket(rest),
        other => Err(PacketError::Type(other.to_string())),
    }
}

fn decode_socket(text: &str) -> Result<Packet, PacketError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let rest = chars.as_str();

    match kind {
        '0' => Ok(Packet::Connected),
        '1' => Ok(Packet::Disconnect),
        '2' => decode_event(rest),
        '4' => {
            let message = serde_json::from_str::<Value>(rest)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| rest.to_string());
            Ok(Packet::ConnectError(message))
        }
        other => Err(PacketError::Type(format!("4{other}"))),
    }
}

/// `["name", data?]`, possibly behind an acknowledgement id
fn decode_event(text: &str) -> Result<Packet, PacketError> {
    let body = text.trim_start_matches(|c: char| c.is_ascii_digit());
    let mut items: Vec<Value> =
        serde_json::from_str(body).map_err(|err| PacketError::Payload(err.to_string()))?;
    if items.is_empty() {
        return Err(PacketError::Payload("event without a name".into()));
    }
    let name = match items.remove(0) {
        Value::String(name) => name,
        other => return Err(PacketError::Payload(format!("event name {other}"))),
    };
    let data = if items.is_empty() { json!({}) } else { items.remove(0) };
    Ok(Packet::Event { name, data })
}

/// Encode an adjacently tagged `{"event", "data"}` message as an event packet.
///
/// An empty payload is left out, so `leave-room` goes out as `42["leave-room"]`.
pub fn encode_event<T: Serialize>(msg: &T) -> Result<String, serde_json::Error> {
    let mut frame = serde_json::to_value(msg)?;
    let name = frame.get_mut("event").map(Value::take).unwrap_or(Value::Null);
    let data = frame.get_mut("data").map(Value::take);

    let args = match data {
        Some(Value::Object(map)) if map.is_empty() => vec![name],
        None | Some(Value::Null) => vec![name],
        Some(data) => vec![name, data],
    };
    Ok(format!("42{}", serde_json::to_string(&args)?))
}

/// Rebuild the `{"event", "data"}` message an event packet carries.
pub fn event_message<T: DeserializeOwned>(name: &str, data: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(json!({ "event": name, "data": data }))
}

/// WebSocket URL of the Socket.IO endpoint for a configured server address.
///
/// Accepts `host:port`, `http://host:port` or `ws://host:port`, with or
/// without an explicit `/socket.io/` path.
pub fn socket_url(addr: &str) -> Result<String, String> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err("empty server address".into());
    }
    if addr.starts_with("https://") || addr.starts_with("wss://") {
        return Err("TLS endpoints are not supported".into());
    }

    let base = addr
        .strip_prefix("http://")
        .or_else(|| addr.strip_prefix("ws://"))
        .unwrap_or(addr);
    if base.contains("://") {
        return Err(format!("unsupported scheme in {addr}"));
    }

    if base.contains("/socket.io") {
        Ok(format!("ws://{base}"))
    } else {
        Ok(format!("ws://{}{}", base.trim_end_matches('/'), HANDSHAKE_PATH))
    }
}
