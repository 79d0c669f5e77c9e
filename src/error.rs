//! Error types
//!
//! The rules engine itself has no error type: illegal and post-game moves
//! are ordinary [`Outcome`](crate::game::Outcome) values. Errors here come
//! from the edges of the program: configuration files and the network.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A server frame whose content does not describe a valid game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("board has {0} rows, expected 8")]
    BoardRows(usize),

    #[error("board row {row} has {len} cells, expected 8")]
    BoardColumns { row: usize, len: usize },

    #[error("unknown cell value {value} at ({row}, {col})")]
    CellValue { row: usize, col: usize, value: u8 },

    #[error("unknown player number {0}")]
    PlayerNumber(u8),

    #[error("move ({0}, {1}) is off the board")]
    MoveOffBoard(u8, u8),
}

/// A WebSocket text message that is not a packet the client understands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,

    #[error("unsupported packet type {0:?}")]
    Type(String),

    #[error("bad packet payload: {0}")]
    Payload(String),
}

/// Connection-level errors of the online client.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("invalid server address {addr}: {reason}")]
    Address { addr: String, reason: String },

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: websocket::Error,
    },

    #[error("no answer from {0}")]
    Timeout(String),

    #[error("server refused the session: {0}")]
    Handshake(String),

    #[error("not connected")]
    NotConnected,

    #[error("websocket error: {0}")]
    WebSocket(#[from] websocket::Error),

    #[error("bad packet: {0}")]
    Packet(#[from] PacketError),

    #[error("connection lost: {0}")]
    Io(#[from] io::Error),

    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid server state: {0}")]
    Wire(#[from] WireError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_error_display() {
        assert_eq!(WireError::BoardRows(7).to_string(), "board has 7 rows, expected 8");
        assert_eq!(
            WireError::CellValue { row: 1, col: 2, value: 9 }.to_string(),
            "unknown cell value 9 at (1, 2)"
        );
    }

    #[test]
    fn test_net_error_from_wire() {
        let err: NetError = WireError::PlayerNumber(3).into();
        assert_eq!(err.to_string(), "invalid server state: unknown player number 3");
    }

    #[test]
    fn test_net_error_from_packet() {
        let err: NetError = PacketError::Type("9".into()).into();
        assert_eq!(err.to_string(), "bad packet: unsupported packet type \"9\"");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid("window.width must be at least 480".into());
        assert_eq!(err.to_string(), "invalid config: window.width must be at least 480");
    }
}
